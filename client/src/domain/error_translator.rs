//! Backend error phrase translation.
//!
//! The backend reports failures as short English phrases inside
//! `{"error": "..."}` bodies. The translator maps a known phrase to a
//! localisation key and resolves it in the active locale. Unknown phrases
//! pass through untouched.
//!
//! Matching runs on the trimmed, lower-cased input: an exact phrase match
//! wins, otherwise the longest known phrase contained in the input is used
//! (earlier declarations win ties).

use std::sync::{Arc, PoisonError, RwLock};

use super::localization::Localizer;

/// Phrase table shipped with the client, in declaration order.
pub const DEFAULT_PHRASES: &[(&str, &str)] = &[
    ("invalid credentials", "errors.invalidCredentials"),
    ("user account is inactive", "errors.userAccountInactive"),
    ("domain already exists", "errors.domainAlreadyExists"),
    ("email already exists", "errors.emailAlreadyExists"),
    ("failed to hash password", "errors.failedToHashPassword"),
    ("invalid request body", "errors.invalidRequestBody"),
    (
        "email and password are required",
        "errors.emailAndPasswordRequired",
    ),
    ("all fields are required", "errors.allFieldsRequired"),
    ("login failed", "errors.loginFailed"),
    ("registration failed", "errors.registrationFailed"),
    ("unknown error", "errors.unknownError"),
    ("user not authenticated", "errors.userNotAuthenticated"),
    ("compliment not found", "errors.complimentNotFound"),
    ("points must be between 0 and 5", "errors.invalidPoints"),
    ("cannot compliment yourself", "errors.cannotComplimentYourself"),
    ("user not found", "errors.userNotFound"),
    ("task not found", "errors.taskNotFound"),
    ("task already completed", "errors.taskAlreadyCompleted"),
    ("task is not completed", "errors.taskNotCompleted"),
    (
        "frequency unit or frequency value not defined",
        "errors.frequencyNotDefined",
    ),
];

fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Maps raw backend error strings to localised messages.
pub struct ErrorTranslator {
    phrases: RwLock<Vec<(String, String)>>,
    localizer: Arc<Localizer>,
}

impl ErrorTranslator {
    /// Translator preloaded with [`DEFAULT_PHRASES`].
    pub fn new(localizer: Arc<Localizer>) -> Self {
        let phrases = DEFAULT_PHRASES
            .iter()
            .map(|(phrase, key)| (normalize(phrase), (*key).to_owned()))
            .collect();
        Self {
            phrases: RwLock::new(phrases),
            localizer,
        }
    }

    /// Add a phrase or repoint an existing one at `key`.
    ///
    /// New phrases are appended, so they lose ties to existing ones.
    pub fn with_phrase(self, phrase: &str, key: impl Into<String>) -> Self {
        self.register(phrase, key);
        self
    }

    /// In-place variant of [`Self::with_phrase`].
    pub fn register(&self, phrase: &str, key: impl Into<String>) {
        let phrase = normalize(phrase);
        let key = key.into();
        let mut phrases = self.phrases.write().unwrap_or_else(PoisonError::into_inner);
        match phrases.iter_mut().find(|(known, _)| *known == phrase) {
            Some(entry) => entry.1 = key,
            None => phrases.push((phrase, key)),
        }
    }

    /// Localisation key for `raw`, if any phrase matches.
    pub fn resolve_key(&self, raw: &str) -> Option<String> {
        let normalized = normalize(raw);
        let phrases = self.phrases.read().unwrap_or_else(PoisonError::into_inner);

        if let Some((_, key)) = phrases.iter().find(|(phrase, _)| *phrase == normalized) {
            return Some(key.clone());
        }

        let mut best: Option<&(String, String)> = None;
        for entry in phrases.iter().filter(|(phrase, _)| {
            !phrase.is_empty() && normalized.contains(phrase.as_str())
        }) {
            if best.is_none_or(|current| entry.0.len() > current.0.len()) {
                best = Some(entry);
            }
        }
        best.map(|(_, key)| key.clone())
    }

    /// Localised message for `raw`, or `raw` unchanged when nothing matches.
    pub fn translate(&self, raw: &str) -> String {
        match self.resolve_key(raw) {
            Some(key) => self.localizer.t(&key),
            None => raw.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for phrase matching.

    use super::*;
    use crate::domain::localization::Locale;
    use crate::outbound::storage::InMemoryKeyValueStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn translator() -> ErrorTranslator {
        let store = Arc::new(InMemoryKeyValueStore::default());
        ErrorTranslator::new(Arc::new(Localizer::with_locale(store, Locale::En)))
    }

    #[rstest]
    fn every_phrase_is_case_and_padding_insensitive(translator: ErrorTranslator) {
        for (phrase, _) in DEFAULT_PHRASES {
            let expected = translator.translate(phrase);
            assert_ne!(expected, *phrase, "{phrase} should be localised");
            assert_eq!(translator.translate(&phrase.to_uppercase()), expected);
            assert_eq!(translator.translate(&format!("  {phrase}  ")), expected);
        }
    }

    #[rstest]
    #[case("Invalid Credentials")]
    #[case("some prefix invalid credentials suffix")]
    fn matches_exact_and_embedded_phrases(translator: ErrorTranslator, #[case] raw: &str) {
        assert_eq!(translator.translate(raw), "Invalid email or password");
    }

    #[rstest]
    #[case("")]
    #[case("Something Broke")]
    #[case("  gateway timeout  ")]
    fn unknown_messages_pass_through_verbatim(translator: ErrorTranslator, #[case] raw: &str) {
        assert_eq!(translator.translate(raw), raw);
    }

    #[rstest]
    fn longest_embedded_phrase_wins(translator: ErrorTranslator) {
        let translator = translator.with_phrase("email", "errors.allFieldsRequired");
        assert_eq!(
            translator.resolve_key("conflict: email already exists").as_deref(),
            Some("errors.emailAlreadyExists")
        );
        assert_eq!(
            translator.resolve_key("bad email").as_deref(),
            Some("errors.allFieldsRequired")
        );
    }

    #[rstest]
    fn equal_length_ties_go_to_earlier_declaration(translator: ErrorTranslator) {
        let translator = translator
            .with_phrase("abc", "first")
            .with_phrase("xyz", "second");
        assert_eq!(translator.resolve_key("xyz abc").as_deref(), Some("first"));
    }

    #[rstest]
    fn registered_phrases_can_repoint_existing_keys(translator: ErrorTranslator) {
        translator.register("  LOGIN FAILED ", "errors.unknownError");
        assert_eq!(translator.translate("login failed"), "Unknown error");
    }
}
