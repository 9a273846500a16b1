//! Translation service
//!
//! Every user-visible label is a translation key. Keys are looked up in the
//! rust-i18n catalogs under `locales/`; a key with no translation is shown
//! as-is.

use rust_i18n::t;
use std::rc::Rc;

/// Looks up user-visible text for a key
pub trait Translate {
    /// Translated text for `key`, or `key` itself when there is none
    fn get_translation(&self, key: &str) -> String;
}

/// Type alias for a shared translator
pub type SharedTranslator = Rc<dyn Translate>;

/// Translator backed by the compiled-in locale catalogs
#[derive(Debug, Clone)]
pub struct LocaleTranslator {
    locale: String,
}

impl LocaleTranslator {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn shared(locale: impl Into<String>) -> SharedTranslator {
        Rc::new(Self::new(locale))
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Translate for LocaleTranslator {
    fn get_translation(&self, key: &str) -> String {
        let text = t!(key, locale = self.locale.as_str());
        // Missing keys come back as the bare key or as "<locale>.<key>"
        if text == key || text == format!("{}.{}", self.locale, key) {
            key.to_string()
        } else {
            text.into_owned()
        }
    }
}

/// Locales with a catalog
pub fn available_locales() -> Vec<String> {
    rust_i18n::available_locales!()
        .into_iter()
        .map(|l| l.to_string())
        .collect()
}

/// Whether `locale` has a catalog
pub fn is_available(locale: &str) -> bool {
    available_locales().iter().any(|l| l == locale)
}
