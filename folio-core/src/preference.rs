//! Language preference: a single string persisted in a key-value store.
//!
//! Reads that fail or return anything other than a supported code resolve to
//! the default language. Writes that fail are dropped.

use std::cell::RefCell;
use std::collections::HashMap;

use tracing::debug;

use crate::error::FolioError;
use crate::i18n::Language;

/// Key-value storage the preference lives in (browser `localStorage` on the page).
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError>;
    fn write(&self, key: &str, value: &str) -> Result<(), FolioError>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, FolioError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), FolioError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The page's language preference on top of a store.
pub struct LanguagePreference<S> {
    store: S,
    key: String,
    default: Language,
}

impl<S: PreferenceStore> LanguagePreference<S> {
    pub fn new(store: S, key: impl Into<String>, default: Language) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// Stored language, or the default when absent, unreadable or unknown.
    pub fn get(&self) -> Language {
        match self.store.read(&self.key) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or(self.default),
            Ok(None) => self.default,
            Err(err) => {
                debug!(%err, "preference read failed, using default");
                self.default
            }
        }
    }

    /// Persist `lang`. Failures are ignored.
    pub fn set(&self, lang: Language) {
        if let Err(err) = self.store.write(&self.key, lang.code()) {
            debug!(%err, "preference write failed, ignored");
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "portfolio-lang";

    struct Unavailable;

    impl PreferenceStore for Unavailable {
        fn read(&self, _key: &str) -> Result<Option<String>, FolioError> {
            Err(FolioError::StoreUnavailable("blocked".into()))
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), FolioError> {
            Err(FolioError::StoreUnavailable("blocked".into()))
        }
    }

    #[test]
    fn empty_store_gives_default() {
        let pref = LanguagePreference::new(MemoryStore::new(), KEY, Language::En);
        assert_eq!(pref.get(), Language::En);
    }

    #[test]
    fn stored_value_is_used() {
        let pref = LanguagePreference::new(MemoryStore::with(KEY, "id"), KEY, Language::En);
        assert_eq!(pref.get(), Language::Id);
    }

    #[test]
    fn unknown_stored_value_gives_default() {
        let pref = LanguagePreference::new(MemoryStore::with(KEY, "fr"), KEY, Language::En);
        assert_eq!(pref.get(), Language::En);
        let pref = LanguagePreference::new(MemoryStore::with(KEY, "ID"), KEY, Language::Id);
        assert_eq!(pref.get(), Language::Id);
    }

    #[test]
    fn set_then_get() {
        let pref = LanguagePreference::new(MemoryStore::new(), KEY, Language::En);
        pref.set(Language::Id);
        assert_eq!(pref.get(), Language::Id);
        assert_eq!(pref.store().read(KEY).unwrap().as_deref(), Some("id"));
    }

    #[test]
    fn unavailable_store_fails_silently() {
        let pref = LanguagePreference::new(Unavailable, KEY, Language::Id);
        pref.set(Language::En);
        assert_eq!(pref.get(), Language::Id);
    }
}
