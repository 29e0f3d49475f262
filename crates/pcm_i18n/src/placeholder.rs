use std::collections::{HashMap, HashSet};

/// Substitution values for `{name}` tokens, supplied per lookup.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Placeholders {
    values: HashMap<String, String>,
}

impl Placeholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Placeholders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Placeholders
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Replace `{name}` tokens in `template` with values from `placeholders`.
///
/// Single left-to-right pass:
/// - the first `{name}` per name is replaced, later repeats stay literal
/// - substituted values are never rescanned
/// - unknown names, `{}` and an unclosed `{` are emitted as-is
pub fn interpolate(template: &str, placeholders: Option<&Placeholders>) -> String {
    let Some(placeholders) = placeholders.filter(|p| !p.is_empty()) else {
        return template.to_string();
    };
    if !template.contains('{') {
        return template.to_string();
    }

    let mut out = String::with_capacity(template.len() + 16);
    let mut used: HashSet<&str> = HashSet::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        // Only a token if it closes before the next `{`.
        let close = after.find('}').filter(|&c| !after[..c].contains('{'));
        let Some(close) = close else {
            out.push('{');
            rest = after;
            continue;
        };

        let name = &after[..close];
        match placeholders.get(name) {
            Some(value) if !name.is_empty() && used.insert(name) => out.push_str(value),
            _ => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn substitutes_named_tokens() {
        let p = Placeholders::from([("name", "Sam")]);
        assert_eq!(interpolate("Hello {name}", Some(&p)), "Hello Sam");
    }

    #[test]
    fn missing_map_leaves_tokens() {
        assert_eq!(interpolate("Hello {name}", None), "Hello {name}");
        assert_eq!(
            interpolate("Hello {name}", Some(&Placeholders::new())),
            "Hello {name}"
        );
    }

    #[test]
    fn unknown_names_stay_literal() {
        let p = Placeholders::from([("name", "Sam")]);
        assert_eq!(
            interpolate("{greeting}, {name}!", Some(&p)),
            "{greeting}, Sam!"
        );
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let p = Placeholders::from([("n", "3")]);
        assert_eq!(interpolate("{n} of {n}", Some(&p)), "3 of {n}");
    }

    #[test]
    fn values_are_not_rescanned() {
        let p = Placeholders::from([("a", "{b}"), ("b", "B")]);
        assert_eq!(interpolate("{a} {b}", Some(&p)), "{b} B");
    }

    #[test]
    fn malformed_braces_are_literal() {
        let p = Placeholders::from([("name", "Sam")]);
        assert_eq!(interpolate("{} {name", Some(&p)), "{} {name");
        assert_eq!(interpolate("{{name}", Some(&p)), "{Sam");
        assert_eq!(interpolate("}{name}{", Some(&p)), "}Sam{");
    }

    #[test]
    fn multibyte_text_around_tokens() {
        let p = Placeholders::from([("name", "홍길동")]);
        assert_eq!(
            interpolate("반갑습니다, {name}님! 👋", Some(&p)),
            "반갑습니다, 홍길동님! 👋"
        );
    }
}
