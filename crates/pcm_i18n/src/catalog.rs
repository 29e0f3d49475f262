//! Per-language dictionaries with a designated default language.
//!
//! The catalog is immutable once built. Resolution never walks further than
//! `active -> default`; the default dictionary is the contract of valid keys.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::dictionary::Dictionary;
use crate::language::{canonicalize_language, negotiation_chain};
use crate::I18nError;

#[derive(Debug)]
enum Section {
    Parsed(Dictionary),
    Source(String),
}

/// Builds a [`Catalog`] from dictionaries or section sources.
///
/// Sections for the same language merge in the order they were added.
#[derive(Debug)]
pub struct CatalogBuilder {
    default_language: String,
    sections: Vec<(String, Section)>,
}

impl CatalogBuilder {
    pub fn new(default_language: impl Into<String>) -> Self {
        Self {
            default_language: default_language.into(),
            sections: Vec::new(),
        }
    }

    /// Add a parsed dictionary (merged with any earlier ones for the language).
    pub fn dictionary(mut self, language: impl Into<String>, dictionary: Dictionary) -> Self {
        self.sections
            .push((language.into(), Section::Parsed(dictionary)));
        self
    }

    /// Add a section source (YAML mapping or legacy `key = value` text).
    pub fn source(mut self, language: impl Into<String>, src: impl Into<String>) -> Self {
        self.sections
            .push((language.into(), Section::Source(src.into())));
        self
    }

    pub fn build(self) -> Result<Catalog, I18nError> {
        let default_language = canonicalize_language(&self.default_language)?;

        let mut dictionaries: HashMap<String, Dictionary> = HashMap::new();
        for (language, section) in self.sections {
            let section = match section {
                Section::Parsed(dictionary) => dictionary,
                Section::Source(src) => {
                    Dictionary::parse(&src).map_err(|source| I18nError::Parse {
                        language: language.clone(),
                        source,
                    })?
                }
            };
            let language = canonicalize_language(&language)?;
            let target = dictionaries.entry(language.clone()).or_default();
            let overwritten = target.merge(section);
            if !overwritten.is_empty() {
                warn!(
                    language = %language,
                    keys = ?overwritten,
                    "Catalog section overrides existing keys"
                );
            }
        }

        if !dictionaries.contains_key(&default_language) {
            return Err(I18nError::MissingDefaultLanguage(default_language));
        }

        Ok(Catalog {
            default_language,
            dictionaries,
        })
    }
}

/// Full set of per-language dictionaries.
#[derive(Clone, Debug)]
pub struct Catalog {
    default_language: String,
    dictionaries: HashMap<String, Dictionary>,
}

impl Catalog {
    pub fn builder(default_language: impl Into<String>) -> CatalogBuilder {
        CatalogBuilder::new(default_language)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Known language codes, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.dictionaries.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    pub fn contains_language(&self, language: &str) -> bool {
        self.resolve_language(language).is_some()
    }

    pub fn dictionary(&self, language: &str) -> Option<&Dictionary> {
        let code = self.resolve_language(language)?;
        self.dictionaries.get(code)
    }

    pub fn default_dictionary(&self) -> &Dictionary {
        // `build` guarantees the default entry.
        &self.dictionaries[&self.default_language]
    }

    /// Map a requested code onto the stored code, if the catalog knows it.
    pub(crate) fn resolve_language(&self, language: &str) -> Option<&str> {
        let canonical = canonicalize_language(language).ok()?;
        self.dictionaries
            .get_key_value(&canonical)
            .map(|(k, _)| k.as_str())
    }

    /// Template for `key` in `language`, falling back to the default language.
    ///
    /// Empty templates count as missing.
    pub fn template(&self, language: &str, key: &str) -> Option<&str> {
        if let Some(s) = self.dictionary(language).and_then(|d| non_empty(d, key)) {
            return Some(s);
        }
        non_empty(self.default_dictionary(), key)
    }

    /// Pick the best known language for an externally requested tag
    /// (e.g. `ko_KR.UTF-8` -> `ko`).
    pub fn negotiate(&self, requested: &str) -> Option<&str> {
        negotiation_chain(requested)
            .iter()
            .find_map(|candidate| self.resolve_language(candidate))
    }

    /// Compare every non-default dictionary against the default one.
    pub fn coverage(&self) -> CoverageReport {
        let default_keys: BTreeSet<&str> = self.default_dictionary().keys().collect();

        let languages = self
            .languages()
            .into_iter()
            .filter(|l| *l != self.default_language)
            .map(|language| {
                let dictionary = self.dictionaries.get(language);
                let keys: BTreeSet<&str> =
                    dictionary.map(|d| d.keys().collect()).unwrap_or_default();
                // Empty templates count as missing, same as `template`.
                let translated_keys: BTreeSet<&str> = dictionary
                    .map(|d| d.keys().filter(|k| non_empty(d, k).is_some()).collect())
                    .unwrap_or_default();
                LanguageCoverage {
                    language: language.to_string(),
                    total: default_keys.len(),
                    translated: default_keys.intersection(&translated_keys).count(),
                    missing: default_keys
                        .difference(&translated_keys)
                        .map(|s| s.to_string())
                        .collect(),
                    orphaned: keys.difference(&default_keys).map(|s| s.to_string()).collect(),
                }
            })
            .collect();

        CoverageReport {
            default_language: self.default_language.clone(),
            languages,
        }
    }

    /// Fail unless the default dictionary holds exactly `expected`.
    pub fn ensure_keys<S: AsRef<str>>(&self, expected: &[S]) -> Result<(), I18nError> {
        let expected: BTreeSet<&str> = expected.iter().map(|s| s.as_ref()).collect();
        let actual: BTreeSet<&str> = self.default_dictionary().keys().collect();

        let missing: Vec<String> = expected.difference(&actual).map(|s| s.to_string()).collect();
        let unexpected: Vec<String> = actual.difference(&expected).map(|s| s.to_string()).collect();
        if missing.is_empty() && unexpected.is_empty() {
            return Ok(());
        }
        Err(I18nError::KeySetMismatch {
            missing,
            unexpected,
        })
    }
}

fn non_empty<'a>(dictionary: &'a Dictionary, key: &str) -> Option<&'a str> {
    dictionary.get(key).filter(|s| !s.is_empty())
}

/// Translation coverage of one non-default language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageCoverage {
    pub language: String,
    /// Keys in the default dictionary.
    pub total: usize,
    pub translated: usize,
    /// Default keys this language lacks or leaves empty; served by fallback.
    pub missing: Vec<String>,
    /// Keys absent from the default dictionary.
    pub orphaned: Vec<String>,
}

impl LanguageCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.orphaned.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoverageReport {
    pub default_language: String,
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.languages.iter().all(LanguageCoverage::is_complete)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Catalog {
        Catalog::builder("ko")
            .source("ko", "greet: \"안녕 {name}\"\nsave: \"저장\"\nempty_ok: \"\"\n")
            .source("en", "greet: \"Hello {name}\"\nsave: \"\"\nlegacy_only: \"Old\"\n")
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_default_language() {
        let err = Catalog::builder("ko")
            .source("en", "save: Save\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::MissingDefaultLanguage(ref l) if l == "ko"));
    }

    #[test]
    fn build_rejects_invalid_language() {
        let err = Catalog::builder("ko")
            .source("ko", "save: 저장\n")
            .source("not a tag", "save: x\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::InvalidLanguage(_)));
    }

    #[test]
    fn build_reports_parse_errors_with_language() {
        let err = Catalog::builder("ko")
            .source("ko", "save: 1\n")
            .build()
            .unwrap_err();
        assert!(matches!(err, I18nError::Parse { ref language, .. } if language == "ko"));
    }

    #[test]
    fn sections_merge_per_language() {
        let catalog = Catalog::builder("ko")
            .source("ko", "confirm: 확인\n")
            .source("ko_KR", "save: 저장\n")
            .source("KO", "cancel: 취소\n")
            .build()
            .unwrap();
        assert_eq!(catalog.languages(), vec!["ko", "ko-KR"]);
        assert_eq!(catalog.dictionary("ko").unwrap().len(), 2);
    }

    #[test]
    fn template_falls_back_on_missing_and_empty() {
        let catalog = sample();
        assert_eq!(catalog.template("en", "greet"), Some("Hello {name}"));
        assert_eq!(catalog.template("en", "save"), Some("저장"));
        assert_eq!(catalog.template("en", "legacy_only"), Some("Old"));
        assert_eq!(catalog.template("ko", "legacy_only"), None);
        assert_eq!(catalog.template("en", "empty_ok"), None);
        assert_eq!(catalog.template("fr", "greet"), Some("안녕 {name}"));
    }

    #[test]
    fn negotiate_uses_primary_subtag() {
        let catalog = sample();
        assert_eq!(catalog.negotiate("ko_KR.UTF-8"), Some("ko"));
        assert_eq!(catalog.negotiate("EN"), Some("en"));
        assert_eq!(catalog.negotiate("fr-FR"), None);
        assert!(!catalog.contains_language("ko-KR"));
    }

    #[test]
    fn coverage_lists_missing_and_orphaned_keys() {
        let report = sample().coverage();
        assert_eq!(report.default_language, "ko");
        assert_eq!(
            report.languages,
            vec![LanguageCoverage {
                language: "en".to_string(),
                total: 3,
                translated: 1,
                missing: vec!["empty_ok".to_string(), "save".to_string()],
                orphaned: vec!["legacy_only".to_string()],
            }]
        );
        assert!(!report.is_complete());
    }

    #[test]
    fn empty_translation_is_not_complete() {
        let catalog = Catalog::builder("ko")
            .source("ko", "save: 저장\n")
            .source("en", "save: \"\"\n")
            .build()
            .unwrap();
        let report = catalog.coverage();
        assert_eq!(report.languages[0].missing, vec!["save".to_string()]);
        assert_eq!(report.languages[0].translated, 0);
        assert!(!report.is_complete());
    }

    #[test]
    fn ensure_keys_detects_mismatch() {
        let catalog = sample();
        assert!(catalog.ensure_keys(&["empty_ok", "greet", "save"]).is_ok());

        let err = catalog.ensure_keys(&["greet", "save", "cancel"]).unwrap_err();
        match err {
            I18nError::KeySetMismatch {
                missing,
                unexpected,
            } => {
                assert_eq!(missing, vec!["cancel".to_string()]);
                assert_eq!(unexpected, vec!["empty_ok".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
