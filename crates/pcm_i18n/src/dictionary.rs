use std::collections::HashMap;

use thiserror::Error;

const MAX_DICTIONARY_ENTRIES: usize = 10_000;
const MAX_KEY_BYTES: usize = 128;
const MAX_VALUE_BYTES: usize = 16 * 1024;

fn is_valid_key(key: &str) -> bool {
    let mut it = key.chars();
    match it.next() {
        Some(c) if c.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    it.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-')
}

/// Source syntax of a dictionary section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    Yaml,
    Legacy,
}

impl SourceFormat {
    /// Decide from the first meaningful line.
    ///
    /// A `:` before any `=` means YAML (`key: a=b`); an `=` first means the
    /// legacy format even if the value contains `:` (`key = Sheet:`).
    pub fn detect(src: &str) -> Self {
        let first = src
            .lines()
            .map(str::trim)
            .find(|line| {
                !line.is_empty() && *line != "---" && !line.starts_with('#') && !line.starts_with("//")
            });
        let Some(line) = first else {
            return SourceFormat::Yaml;
        };

        match (line.find(':'), line.find('=')) {
            (Some(colon), Some(eq)) if eq < colon => SourceFormat::Legacy,
            (Some(_), _) => SourceFormat::Yaml,
            _ => SourceFormat::Legacy,
        }
    }
}

fn check_entry(key: &str, value: &str) -> Result<(), String> {
    if !is_valid_key(key) {
        return Err(format!(
            "invalid key `{key}` (allowed: [A-Za-z0-9][A-Za-z0-9_.-]*)"
        ));
    }
    if key.len() > MAX_KEY_BYTES {
        return Err(format!("key `{key}` is too long (max {MAX_KEY_BYTES} bytes)"));
    }
    if value.len() > MAX_VALUE_BYTES {
        return Err(format!(
            "value for key `{key}` is too long (max {MAX_VALUE_BYTES} bytes)"
        ));
    }
    Ok(())
}

fn parse_yaml_entries(src: &str) -> Result<HashMap<String, String>, DictionaryParseError> {
    let raw = match serde_yaml::from_str::<serde_yaml::Value>(src) {
        Ok(serde_yaml::Value::Mapping(raw)) => raw,
        Ok(serde_yaml::Value::Null) => return Ok(HashMap::new()),
        Ok(_) => {
            return Err(DictionaryParseError::Yaml(
                "expected a mapping of keys to strings".to_string(),
            ))
        }
        Err(e) => return Err(DictionaryParseError::Yaml(format!("yaml parse error: {e}"))),
    };

    if raw.len() > MAX_DICTIONARY_ENTRIES {
        return Err(DictionaryParseError::Yaml(format!(
            "too many entries (max {MAX_DICTIONARY_ENTRIES})"
        )));
    }
    let mut out = HashMap::with_capacity(raw.len());
    for (k, v) in raw {
        let Some(key) = k.as_str() else {
            return Err(DictionaryParseError::Yaml(
                "yaml keys must be strings".to_string(),
            ));
        };
        let Some(val) = v.as_str() else {
            return Err(DictionaryParseError::Yaml(format!(
                "yaml value for key `{key}` must be a string"
            )));
        };
        check_entry(key, val).map_err(DictionaryParseError::Yaml)?;
        out.insert(key.to_string(), val.to_string());
    }
    Ok(out)
}

/// One language's flat key -> template map.
///
/// Source text is either a YAML mapping or the legacy line format:
/// - One entry per line: `key = value`
/// - Comments: `# ...` or `// ...`
/// - Optional quoting: `"..."` or `'...'` (supports a few escapes)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a template, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Merge another section into this one. Later values win.
    ///
    /// Returns the keys that were overwritten, sorted.
    pub fn merge(&mut self, other: Dictionary) -> Vec<String> {
        let mut overwritten = Vec::new();
        for (k, v) in other.entries {
            if self.entries.contains_key(&k) {
                overwritten.push(k.clone());
            }
            self.entries.insert(k, v);
        }
        overwritten.sort_unstable();
        overwritten
    }

    /// Parse either format, picked by [`SourceFormat::detect`].
    pub fn parse(src: &str) -> Result<Self, DictionaryParseError> {
        match SourceFormat::detect(src) {
            SourceFormat::Yaml => Self::parse_yaml(src),
            SourceFormat::Legacy => Self::parse_legacy(src),
        }
    }

    /// Parse a YAML mapping of string keys to string templates.
    pub fn parse_yaml(src: &str) -> Result<Self, DictionaryParseError> {
        Ok(Self {
            entries: parse_yaml_entries(src)?,
        })
    }

    /// Parse the legacy `key = value` line format.
    pub fn parse_legacy(src: &str) -> Result<Self, DictionaryParseError> {
        let mut dict = Self::new();
        for (idx, raw_line) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }

            let Some(eq) = line.find('=') else {
                return Err(DictionaryParseError::Syntax {
                    line: line_no,
                    msg: "expected `key = value`".to_string(),
                });
            };

            let key = line[..eq].trim();
            if key.is_empty() {
                return Err(DictionaryParseError::Syntax {
                    line: line_no,
                    msg: "empty key".to_string(),
                });
            }

            let mut value = line[eq + 1..].trim().to_string();
            // Inline comments only count when preceded by whitespace.
            for marker in [" #", " //"] {
                if let Some(pos) = value.find(marker) {
                    value.truncate(pos);
                    value = value.trim().to_string();
                }
            }

            let value = unquote_and_unescape(&value).map_err(|msg| DictionaryParseError::Syntax {
                line: line_no,
                msg,
            })?;
            check_entry(key, &value).map_err(|msg| DictionaryParseError::Syntax {
                line: line_no,
                msg,
            })?;
            if dict.entries.len() >= MAX_DICTIONARY_ENTRIES && !dict.entries.contains_key(key) {
                return Err(DictionaryParseError::Syntax {
                    line: line_no,
                    msg: format!("too many entries (max {MAX_DICTIONARY_ENTRIES})"),
                });
            }

            dict.insert(key, value);
        }
        Ok(dict)
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DictionaryParseError {
    #[error("yaml dictionary error: {0}")]
    Yaml(String),

    #[error("dictionary syntax error at line {line}: {msg}")]
    Syntax { line: usize, msg: String },
}

fn unquote_and_unescape(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        return unescape(&s[1..s.len() - 1]);
    }
    Ok(s.to_string())
}

fn unescape(s: &str) -> Result<String, String> {
    let mut out = String::with_capacity(s.len());
    let mut it = s.chars();
    while let Some(c) = it.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(n) = it.next() else {
            return Err("dangling escape".to_string());
        };
        match n {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            // `\\`, `\"`, `\'` and unknown escapes keep the escaped char.
            _ => out.push(n),
        }
    }
    Ok(out)
}
