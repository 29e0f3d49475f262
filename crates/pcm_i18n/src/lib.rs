//! PCM internationalization (i18n)
//!
//! - A [`Catalog`] of flat per-language dictionaries with one default language
//! - A [`Translator`] per UI session holding the active language
//! - Lookup falls back active -> default -> key, so a missing translation never
//!   renders blank or fails
//! - `{name}` placeholders filled from a per-call [`Placeholders`] map
//! - [`builtin`]: the Korean/English catalog compiled into the binary

mod catalog;
mod dictionary;
mod error;
mod language;
mod placeholder;
mod translator;

pub mod builtin;

pub use catalog::{Catalog, CatalogBuilder, CoverageReport, LanguageCoverage};
pub use dictionary::{Dictionary, DictionaryParseError, SourceFormat};
pub use error::I18nError;
pub use language::{canonicalize_language, negotiation_chain};
pub use placeholder::{interpolate, Placeholders};
pub use translator::Translator;

/// Convenience macro for building a [`Placeholders`] map.
///
/// Values go through `ToString`, so numbers work directly:
/// - `placeholders! { name: user_name }`
/// - `placeholders! { term: query, n: 12 }`
#[macro_export]
macro_rules! placeholders {
    ($($name:ident : $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut p = $crate::Placeholders::new();
        $(
            p.insert(stringify!($name), ::std::string::ToString::to_string(&$value));
        )*
        p
    }};
}
