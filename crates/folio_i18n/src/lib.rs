//! Folio internationalization (i18n)
//!
//! Goals:
//! - Locale is always an explicit argument, never ambient state
//! - Locale-aware number formatting for German and English documents
//! - Small YAML string catalogs for chart UI text (placeholders, accessibility labels)

mod catalog;
mod error;
mod locale;
mod message;
mod number;
mod simple;

pub use catalog::Catalogs;
pub use error::I18nError;
pub use locale::{locale_fallback_chain, normalize_locale, DEFAULT_LOCALE};
pub use message::{ArgValue, Message};
pub use number::NumberFormat;
pub use simple::{SimpleCatalog, SimpleParseError};
