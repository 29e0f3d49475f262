//! Plain-text rendering of catalog information

use pcm_i18n::{CoverageReport, Translator};
use std::fmt::Write;

/// One language per line; `*` marks the active one, `(default)` the fallback.
pub fn languages(translator: &Translator) -> String {
    let catalog = translator.catalog();
    let active = translator.language();

    let mut out = String::new();
    for language in catalog.languages() {
        let marker = if language == active { '*' } else { ' ' };
        let keys = catalog.dictionary(language).map_or(0, |d| d.len());
        let _ = write!(out, "{marker} {language} ({keys} keys)");
        if language == catalog.default_language() {
            out.push_str(" (default)");
        }
        out.push('\n');
    }
    out
}

pub fn coverage(report: &CoverageReport) -> String {
    let mut out = String::new();
    if report.languages.is_empty() {
        let _ = writeln!(out, "only the default language `{}` is loaded", report.default_language);
        return out;
    }

    for lang in &report.languages {
        let _ = writeln!(
            out,
            "{}: {}/{} translated (fallback: {})",
            lang.language, lang.translated, lang.total, report.default_language
        );
        for key in &lang.missing {
            let _ = writeln!(out, "  missing   {key}");
        }
        for key in &lang.orphaned {
            let _ = writeln!(out, "  orphaned  {key}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcm_i18n::Catalog;
    use pretty_assertions::assert_eq;

    fn translator() -> Translator {
        let catalog = Catalog::builder("ko")
            .source("ko", "save: 저장\ncancel: 취소\n")
            .source("en", "save: Save\nextra: Extra\n")
            .build()
            .unwrap();
        Translator::with_language(catalog, "en").unwrap()
    }

    #[test]
    fn languages_marks_active_and_default() {
        assert_eq!(
            languages(&translator()),
            "* en (2 keys)\n  ko (2 keys) (default)\n"
        );
    }

    #[test]
    fn coverage_lists_missing_and_orphaned() {
        let report = translator().catalog().coverage();
        assert_eq!(
            coverage(&report),
            "en: 1/2 translated (fallback: ko)\n  missing   cancel\n  orphaned  extra\n"
        );
    }
}
