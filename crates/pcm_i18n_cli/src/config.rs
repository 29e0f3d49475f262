//! pcm-i18n configuration file handling

use anyhow::{Context, Result};
use pcm_i18n::{builtin, Catalog, Dictionary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "pcm-i18n.toml";

/// Top-level configuration (pcm-i18n.toml)
#[derive(Debug, Deserialize, Serialize)]
pub struct I18nConfig {
    #[serde(default = "default_language")]
    pub default_language: String,
    /// Language selected at startup
    #[serde(default)]
    pub active_language: Option<String>,
    /// Section files per language, merged in order.
    /// Empty means the built-in catalog.
    #[serde(default)]
    pub languages: BTreeMap<String, Vec<PathBuf>>,
    /// Directory relative section paths resolve against
    #[serde(skip)]
    base_dir: PathBuf,
}

fn default_language() -> String {
    builtin::Language::DEFAULT.code().to_string()
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            active_language: None,
            languages: BTreeMap::new(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl I18nConfig {
    /// Load configuration from a file, or from `pcm-i18n.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        config.base_dir = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(config)
    }

    /// Use `explicit` if given, else `pcm-i18n.toml` in the working directory
    /// if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            return Self::load(local);
        }
        tracing::debug!("No {} found, using built-in catalog", CONFIG_FILE);
        Ok(Self::default())
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: I18nConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Section paths for a language, resolved against the config directory
    pub fn section_paths(&self, language: &str) -> Vec<PathBuf> {
        self.languages
            .get(language)
            .map(|paths| paths.iter().map(|p| self.base_dir.join(p)).collect())
            .unwrap_or_default()
    }

    /// Build the catalog this configuration describes
    pub fn build_catalog(&self) -> Result<Catalog> {
        if self.languages.is_empty() {
            return Ok(builtin::catalog()?);
        }

        let mut builder = Catalog::builder(&self.default_language);
        for language in self.languages.keys() {
            for path in self.section_paths(language) {
                let src = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let dictionary = match path.extension().and_then(|e| e.to_str()) {
                    Some("yaml" | "yml") => Dictionary::parse_yaml(&src),
                    _ => Dictionary::parse(&src),
                }
                .with_context(|| format!("Failed to parse {}", path.display()))?;
                tracing::debug!(language = %language, path = %path.display(), "Loaded section");
                builder = builder.dictionary(language, dictionary);
            }
        }

        builder.build().context("Failed to build catalog")
    }
}
