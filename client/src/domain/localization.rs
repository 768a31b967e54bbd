//! Locale selection and message lookup.
//!
//! Catalogues ship inside the binary as nested JSON documents and are
//! flattened to dotted keys (`errors.invalidCredentials`) on load. Lookups
//! try the active locale first, then the fallback locale, and finally echo
//! the key back so a missing translation is visible rather than silent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;
use tracing::warn;

use super::ports::{KeyValueStore, KeyValueStoreError, LOCALE_KEY};

const PT_BR_MESSAGES: &str = include_str!("../../locales/pt-BR.json");
const ES_MESSAGES: &str = include_str!("../../locales/es.json");
const EN_MESSAGES: &str = include_str!("../../locales/en.json");

/// Locales the client ships catalogues for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Locale {
    /// Brazilian Portuguese; the default and fallback locale.
    PtBr,
    /// Spanish.
    Es,
    /// US English.
    En,
}

impl Locale {
    /// Every supported locale in presentation order.
    pub const ALL: [Self; 3] = [Self::PtBr, Self::Es, Self::En];

    /// Locale used when nothing has been selected yet.
    pub const DEFAULT: Self = Self::PtBr;

    /// Locale consulted when the active catalogue lacks a key.
    pub const FALLBACK: Self = Self::PtBr;

    /// Parse a stored locale code such as `pt-BR`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "pt-BR" => Some(Self::PtBr),
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    /// Canonical locale code persisted in storage.
    pub const fn code(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::Es => "es",
            Self::En => "en",
        }
    }

    /// Human-readable name in the locale's own language.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::PtBr => "Português (Brasil)",
            Self::Es => "Español",
            Self::En => "English (US)",
        }
    }

    /// Flag emoji shown next to the display name.
    pub const fn flag(self) -> &'static str {
        match self {
            Self::PtBr => "🇧🇷",
            Self::Es => "🇪🇸",
            Self::En => "🇺🇸",
        }
    }

    fn embedded_messages(self) -> &'static str {
        match self {
            Self::PtBr => PT_BR_MESSAGES,
            Self::Es => ES_MESSAGES,
            Self::En => EN_MESSAGES,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Flattened message catalogue for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageCatalog(BTreeMap<String, String>);

impl MessageCatalog {
    /// Build a catalogue from a nested JSON document.
    ///
    /// Non-string leaves are ignored; only objects and strings contribute.
    pub fn from_json(document: &str) -> Result<Self, serde_json::Error> {
        let root: Value = serde_json::from_str(document)?;
        let mut messages = BTreeMap::new();
        flatten_into(&mut messages, String::new(), &root);
        Ok(Self(messages))
    }

    /// Look up a dotted key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Number of messages in the catalogue.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the catalogue has no messages.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn flatten_into(messages: &mut BTreeMap<String, String>, prefix: String, node: &Value) {
    match node {
        Value::Object(children) => {
            for (name, child) in children {
                let key = if prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{prefix}.{name}")
                };
                flatten_into(messages, key, child);
            }
        }
        Value::String(text) => {
            messages.insert(prefix, text.clone());
        }
        _ => {}
    }
}

/// Active-locale message lookup with persisted locale selection.
pub struct Localizer {
    catalogs: BTreeMap<Locale, MessageCatalog>,
    active: RwLock<Locale>,
    store: Arc<dyn KeyValueStore>,
}

impl Localizer {
    /// Load the embedded catalogues and restore the saved locale.
    ///
    /// A missing or unrecognised saved code selects [`Locale::DEFAULT`].
    pub fn restore(store: Arc<dyn KeyValueStore>) -> Result<Self, KeyValueStoreError> {
        let saved = store.get(LOCALE_KEY)?;
        let active = match saved.as_deref() {
            Some(code) => Locale::from_code(code).unwrap_or_else(|| {
                warn!(code, "unknown saved locale; using default");
                Locale::DEFAULT
            }),
            None => Locale::DEFAULT,
        };
        Ok(Self::with_locale(store, active))
    }

    /// Build a localizer with an explicit active locale, without consulting storage.
    pub fn with_locale(store: Arc<dyn KeyValueStore>, active: Locale) -> Self {
        let catalogs = Locale::ALL
            .into_iter()
            .map(|locale| (locale, load_embedded(locale)))
            .collect();
        Self {
            catalogs,
            active: RwLock::new(active),
            store,
        }
    }

    /// Currently active locale.
    pub fn locale(&self) -> Locale {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch the active locale and persist the choice.
    pub fn select(&self, locale: Locale) -> Result<(), KeyValueStoreError> {
        self.store.set(LOCALE_KEY, locale.code())?;
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = locale;
        Ok(())
    }

    /// Resolve `key` against the active locale, then the fallback locale.
    ///
    /// Unknown keys resolve to the key itself.
    pub fn t(&self, key: &str) -> String {
        let active = self.locale();
        [active, Locale::FALLBACK]
            .into_iter()
            .find_map(|locale| self.catalogs.get(&locale)?.get(key))
            .unwrap_or(key)
            .to_owned()
    }
}

fn load_embedded(locale: Locale) -> MessageCatalog {
    MessageCatalog::from_json(locale.embedded_messages()).unwrap_or_else(|error| {
        warn!(locale = %locale, %error, "embedded catalogue failed to parse");
        MessageCatalog::default()
    })
}
