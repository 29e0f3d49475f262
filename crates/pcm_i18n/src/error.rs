use thiserror::Error;

use crate::dictionary::DictionaryParseError;

/// Errors from building catalogs and selecting languages.
#[derive(Debug, Error)]
pub enum I18nError {
    #[error("unknown language `{language}` (known: {})", .known.join(", "))]
    UnknownLanguage { language: String, known: Vec<String> },

    #[error("invalid language tag `{0}`")]
    InvalidLanguage(String),

    #[error("default language `{0}` has no dictionary")]
    MissingDefaultLanguage(String),

    #[error("failed to parse `{language}` catalog: {source}")]
    Parse {
        language: String,
        #[source]
        source: DictionaryParseError,
    },

    #[error(
        "default dictionary key set mismatch (missing: [{}], unexpected: [{}])",
        .missing.join(", "),
        .unexpected.join(", ")
    )]
    KeySetMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_list_context() {
        let err = I18nError::UnknownLanguage {
            language: "fr".to_string(),
            known: vec!["en".to_string(), "ko".to_string()],
        };
        assert_eq!(err.to_string(), "unknown language `fr` (known: en, ko)");

        let err = I18nError::KeySetMismatch {
            missing: vec!["save".to_string()],
            unexpected: Vec::new(),
        };
        assert_eq!(
            err.to_string(),
            "default dictionary key set mismatch (missing: [save], unexpected: [])"
        );
    }
}
