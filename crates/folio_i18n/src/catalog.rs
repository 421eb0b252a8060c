use rustc_hash::FxHashMap;
use tracing::debug;

use crate::locale::{locale_fallback_chain, normalize_locale};
use crate::message::Message;
use crate::simple::SimpleCatalog;
use crate::I18nError;

const BUILTIN_EN: &str = include_str!("../locales/en.yaml");
const BUILTIN_DE: &str = include_str!("../locales/de.yaml");

/// Per-locale string catalogs.
///
/// Lookups walk the locale fallback chain (`de-AT` -> `de` -> `en`). A key that
/// no catalog knows resolves to the key itself, so a missing translation shows
/// up as visible text rather than an error.
#[derive(Clone, Debug, Default)]
pub struct Catalogs {
    by_locale: FxHashMap<String, SimpleCatalog>,
}

impl Catalogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogs with the bundled German and English chart strings.
    pub fn builtin() -> Self {
        let mut out = Self::new();
        for (locale, src) in [("en", BUILTIN_EN), ("de", BUILTIN_DE)] {
            match SimpleCatalog::parse(src) {
                Ok(cat) => out.insert(locale, cat),
                Err(e) => debug!("bundled catalog `{locale}` failed to parse: {e}"),
            }
        }
        out
    }

    pub fn insert(&mut self, locale: &str, catalog: SimpleCatalog) {
        self.by_locale.insert(normalize_locale(locale), catalog);
    }

    /// Parse `src` and merge its entries over any existing catalog for `locale`.
    pub fn load_yaml(&mut self, locale: &str, src: &str) -> Result<(), I18nError> {
        let loc = normalize_locale(locale);
        if loc.is_empty() {
            return Err(I18nError::InvalidLocale(locale.to_string()));
        }
        let parsed = SimpleCatalog::parse(src)?;
        debug!("loaded {} catalog entries for `{loc}`", parsed.len());
        let target = self.by_locale.entry(loc).or_default();
        target.merge(parsed);
        Ok(())
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.by_locale.contains_key(&normalize_locale(locale))
    }

    /// Resolve `msg` for `locale`.
    pub fn format(&self, locale: &str, msg: &Message) -> String {
        for candidate in locale_fallback_chain(locale) {
            if let Some(text) = self
                .by_locale
                .get(&candidate)
                .and_then(|cat| cat.format_message(msg))
            {
                return text;
            }
        }
        msg.id.to_string()
    }

    /// Resolve a message without arguments.
    pub fn text(&self, locale: &str, key: &'static str) -> String {
        self.format(locale, &Message::new(key))
    }
}
