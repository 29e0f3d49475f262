use unic_langid::LanguageIdentifier;

use crate::I18nError;

/// Canonicalize a language tag for catalog lookup.
///
/// - Trims whitespace and drops POSIX suffixes (`ko_KR.UTF-8`, `de_DE@euro`).
/// - Converts `_` to `-`.
/// - Normalizes subtag casing (`EN-us` -> `en-US`).
pub fn canonicalize_language(tag: &str) -> Result<String, I18nError> {
    let trimmed = tag.trim();
    let base = trimmed
        .split(|c| c == '.' || c == '@')
        .next()
        .unwrap_or(trimmed)
        .replace('_', "-");
    if base.is_empty() {
        return Err(I18nError::InvalidLanguage(tag.to_string()));
    }

    let id: LanguageIdentifier = base
        .parse()
        .map_err(|_| I18nError::InvalidLanguage(tag.to_string()))?;
    Ok(id.to_string())
}

/// Candidate tags tried when matching a requested language against a catalog.
///
/// Example:
/// - `ko_KR.UTF-8` -> `["ko-KR", "ko"]`
/// - `en` -> `["en"]`
pub fn negotiation_chain(tag: &str) -> Vec<String> {
    let Ok(canonical) = canonicalize_language(tag) else {
        return Vec::new();
    };

    let mut chain = vec![canonical.clone()];
    if let Some(primary) = canonical.split('-').next() {
        if !primary.is_empty() && primary != canonical {
            chain.push(primary.to_string());
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn canonicalizes_posix_and_casing() {
        assert_eq!(canonicalize_language("ko_kr").unwrap(), "ko-KR");
        assert_eq!(canonicalize_language(" EN ").unwrap(), "en");
        assert_eq!(canonicalize_language("ko_KR.UTF-8").unwrap(), "ko-KR");
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            canonicalize_language(""),
            Err(I18nError::InvalidLanguage(_))
        ));
        assert!(matches!(
            canonicalize_language("not a tag!"),
            Err(I18nError::InvalidLanguage(_))
        ));
    }

    #[test]
    fn chain_adds_primary_subtag() {
        assert_eq!(negotiation_chain("ko_KR.UTF-8"), vec!["ko-KR", "ko"]);
        assert_eq!(negotiation_chain("en"), vec!["en"]);
        assert!(negotiation_chain("!!").is_empty());
    }
}
