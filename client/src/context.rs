//! Composition root shared by front ends.
//!
//! A [`ClientContext`] wires one key-value store into the localizer and the
//! session store, builds a single transport from the resolved base URL, and
//! hands every resource adapter that same transport.

use std::sync::Arc;

use tracing::debug;

use crate::config::{ApiBaseUrl, BuildMode, ClientSettings, TranslationScope};
use crate::domain::ports::{AuthApi, ComplimentsApi, KeyValueStore, TasksApi, UsersApi};
use crate::domain::ports::define_port_error;
use crate::domain::{ErrorTranslator, Localizer, RouteGuard, SessionStore};
use crate::outbound::http::{
    ApiTransport, HttpAuthApi, HttpComplimentsApi, HttpTasksApi, HttpUsersApi,
};
use crate::outbound::storage::{InMemoryKeyValueStore, JsonFileKeyValueStore};

define_port_error! {
    /// Errors raised while assembling a client context.
    pub enum ContextError {
        /// The key-value store could not be opened or read.
        Storage { message: String } =>
            "failed to open client storage: {message}",
        /// The configured base URL is not an absolute URL.
        InvalidBaseUrl { url: String, message: String } =>
            "invalid API base URL {url}: {message}",
        /// The HTTP client could not be built.
        Http { message: String } =>
            "failed to build HTTP client: {message}",
    }
}

/// Services and resource clients sharing one store and one transport.
pub struct ClientContext {
    /// Active-locale message lookup.
    pub localizer: Arc<Localizer>,
    /// Persisted session state.
    pub sessions: Arc<SessionStore>,
    /// Backend error phrase translation.
    pub translator: Arc<ErrorTranslator>,
    /// Navigation gate.
    pub guard: RouteGuard,
    /// Authentication client.
    pub auth: Arc<dyn AuthApi>,
    /// Compliments client.
    pub compliments: Arc<dyn ComplimentsApi>,
    /// Tasks client.
    pub tasks: Arc<dyn TasksApi>,
    /// Users client.
    pub users: Arc<dyn UsersApi>,
}

impl ClientContext {
    /// Build a context from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError`] when storage cannot be opened, the base URL
    /// is malformed, or the HTTP client cannot be built.
    pub fn from_settings(settings: &ClientSettings, mode: BuildMode) -> Result<Self, ContextError> {
        let store: Arc<dyn KeyValueStore> = if settings.ephemeral_storage {
            Arc::new(InMemoryKeyValueStore::default())
        } else {
            let path = settings.storage_path();
            debug!(path = %path.display(), "opening client storage");
            Arc::new(
                JsonFileKeyValueStore::open(&path)
                    .map_err(|error| ContextError::storage(error.to_string()))?,
            )
        };
        Self::new(
            store,
            settings.api_base_url(mode),
            settings.translation_scope(),
        )
    }

    /// Build a context over an explicit store and base URL.
    ///
    /// # Errors
    ///
    /// See [`Self::from_settings`].
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        base_url: ApiBaseUrl,
        scope: TranslationScope,
    ) -> Result<Self, ContextError> {
        base_url.validate().map_err(|error| {
            ContextError::invalid_base_url(base_url.as_str(), error.to_string())
        })?;

        let localizer = Arc::new(
            Localizer::restore(store.clone())
                .map_err(|error| ContextError::storage(error.to_string()))?,
        );
        let sessions = Arc::new(SessionStore::new(store, localizer.clone()));
        let translator = Arc::new(ErrorTranslator::new(localizer.clone()));
        debug!(base_url = base_url.as_str(), ?scope, "building API transport");
        let transport = Arc::new(
            ApiTransport::new(base_url, sessions.clone(), translator.clone(), scope)
                .map_err(|error| ContextError::http(error.to_string()))?,
        );

        Ok(Self {
            guard: RouteGuard::new(sessions.clone()),
            auth: Arc::new(HttpAuthApi::new(transport.clone())),
            compliments: Arc::new(HttpComplimentsApi::new(transport.clone())),
            tasks: Arc::new(HttpTasksApi::new(transport.clone())),
            users: Arc::new(HttpUsersApi::new(transport)),
            localizer,
            sessions,
            translator,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Locale;
    use crate::domain::ports::LOCALE_KEY;

    #[test]
    fn restores_saved_locale_from_the_shared_store() {
        let store = Arc::new(InMemoryKeyValueStore::default());
        store.set(LOCALE_KEY, "es").expect("seed locale");

        let context = ClientContext::new(
            store,
            ApiBaseUrl::new("http://localhost:8080"),
            TranslationScope::default(),
        )
        .expect("context builds");

        assert_eq!(context.localizer.locale(), Locale::Es);
        assert!(!context.sessions.has_session());
    }

    #[test]
    fn rejects_malformed_base_url() {
        let err = ClientContext::new(
            Arc::new(InMemoryKeyValueStore::default()),
            ApiBaseUrl::new("not a url"),
            TranslationScope::default(),
        )
        .err()
        .expect("malformed base rejected");

        assert!(matches!(err, ContextError::InvalidBaseUrl { .. }));
    }
}
