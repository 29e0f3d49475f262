use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::debug;

use crate::catalog::Catalog;
use crate::placeholder::{interpolate, Placeholders};
use crate::I18nError;

type LanguageListener = Arc<dyn Fn(&str) + Send + Sync>;

/// Resolves keys against a shared [`Catalog`] for one UI session.
///
/// The catalog is immutable; the active language is the only mutable state and
/// lives here rather than in a global, so each session owns its selection.
pub struct Translator {
    catalog: Arc<Catalog>,
    language: RwLock<String>,
    listeners: Mutex<Vec<LanguageListener>>,
}

impl Translator {
    /// Start in the catalog's default language.
    pub fn new(catalog: impl Into<Arc<Catalog>>) -> Self {
        let catalog = catalog.into();
        let language = catalog.default_language().to_string();
        Self {
            catalog,
            language: RwLock::new(language),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Start in `language`, which must be known to the catalog.
    pub fn with_language(
        catalog: impl Into<Arc<Catalog>>,
        language: impl AsRef<str>,
    ) -> Result<Self, I18nError> {
        let translator = Self::new(catalog);
        let code = translator.known_language(language.as_ref())?;
        *translator
            .language
            .write()
            .unwrap_or_else(PoisonError::into_inner) = code;
        Ok(translator)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active language code.
    pub fn language(&self) -> String {
        self.language
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Switch the active language.
    ///
    /// Unknown codes are rejected and leave the active language unchanged.
    /// Listeners run only when the language actually changes.
    pub fn set_language(&self, language: impl AsRef<str>) -> Result<(), I18nError> {
        let code = self.known_language(language.as_ref())?;

        let mut cur = self
            .language
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if *cur == code {
            return Ok(());
        }
        debug!("Translator::set_language: {} -> {}", *cur, code);
        *cur = code.clone();
        drop(cur);

        // Snapshot so listeners may call back into this translator.
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(&code);
        }
        Ok(())
    }

    /// Register a callback invoked with the new code after each language switch.
    pub fn on_language_change(&self, listener: impl Fn(&str) + Send + Sync + 'static) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Resolve `key` in the active language and fill in placeholders.
    ///
    /// Lookup order: active language, default language, the key itself.
    /// Never fails.
    pub fn translate(&self, key: impl AsRef<str>, placeholders: Option<&Placeholders>) -> String {
        let key = key.as_ref();
        let language = self.language();

        let active = self
            .catalog
            .dictionary(&language)
            .and_then(|d| d.get(key))
            .filter(|s| !s.is_empty());

        let template = match active {
            Some(s) => s,
            None => match self.catalog.template(self.catalog.default_language(), key) {
                Some(s) => {
                    debug!(
                        language = %language,
                        key,
                        "Missing translation, using default language"
                    );
                    s
                }
                None => {
                    debug!(key, "Missing translation key, returning key as-is");
                    key
                }
            },
        };

        interpolate(template, placeholders)
    }

    /// [`Translator::translate`] without placeholders.
    pub fn t(&self, key: impl AsRef<str>) -> String {
        self.translate(key, None)
    }

    fn known_language(&self, language: &str) -> Result<String, I18nError> {
        self.catalog
            .resolve_language(language)
            .map(str::to_string)
            .ok_or_else(|| I18nError::UnknownLanguage {
                language: language.to_string(),
                known: self
                    .catalog
                    .languages()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("language", &self.language())
            .field("languages", &self.catalog.languages())
            .finish_non_exhaustive()
    }
}
