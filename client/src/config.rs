//! Client configuration loaded via OrthoConfig.
//!
//! Settings layer command-line flags over `KUDOS_*` environment variables
//! and an optional configuration file. The backend base URL is resolved once
//! here and injected into the shared transport, so every resource client
//! talks to the same host.

use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::http::ResourceFamily;

/// Development backend used by debug builds when no override is set.
pub const DEVELOPMENT_API_BASE_URL: &str = "http://localhost:8080";

const DEFAULT_STORAGE_PATH: &str = ".kudos/storage.json";

/// Build mode used to pick the default base URL.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds default to the local development backend.
    Debug,
    /// Release builds default to the same origin.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kudos_client::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Backend base URL shared by every resource client.
///
/// An empty base means same-origin: endpoint paths are used as given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiBaseUrl(String);

impl ApiBaseUrl {
    /// Wrap a base URL, trimming surrounding whitespace and trailing slashes.
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().trim_end_matches('/').to_owned())
    }

    /// Pick the base URL for a build.
    ///
    /// A non-blank `configured` value wins; otherwise debug builds use
    /// [`DEVELOPMENT_API_BASE_URL`] and release builds use the same origin.
    pub fn resolve(configured: Option<&str>, mode: BuildMode) -> Self {
        match configured.filter(|value| !value.trim().is_empty()) {
            Some(value) => Self::new(value),
            None => match mode {
                BuildMode::Debug => Self::new(DEVELOPMENT_API_BASE_URL),
                BuildMode::Release => Self::default(),
            },
        }
    }

    /// Base URL without a trailing slash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check that a non-empty base is an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns the parse error for a malformed base.
    pub fn validate(&self) -> Result<(), url::ParseError> {
        if self.0.is_empty() {
            return Ok(());
        }
        url::Url::parse(&self.0).map(|_| ())
    }

    /// Full URL of an endpoint path such as `/users/ranking`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

/// Which resource families have their error messages translated.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TranslationScope {
    /// Translate failures from every resource client.
    #[default]
    AllResources,
    /// Translate authentication failures only; other clients surface the
    /// backend message verbatim.
    AuthOnly,
}

impl TranslationScope {
    /// Whether failures from `family` are translated.
    pub fn covers(self, family: ResourceFamily) -> bool {
        match self {
            Self::AllResources => true,
            Self::AuthOnly => family == ResourceFamily::Auth,
        }
    }
}

/// Configuration values for the command-line client.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "KUDOS")]
pub struct ClientSettings {
    /// Backend base URL override.
    pub api_base_url: Option<String>,
    /// Location of the persisted session and locale file.
    pub storage_path: Option<PathBuf>,
    /// Keep session state in memory for this process only.
    #[ortho_config(default = false)]
    pub ephemeral_storage: bool,
    /// Translate authentication errors only.
    #[ortho_config(default = false)]
    pub auth_only_translation: bool,
}

impl ClientSettings {
    /// Resolved base URL for the given build mode.
    pub fn api_base_url(&self, mode: BuildMode) -> ApiBaseUrl {
        ApiBaseUrl::resolve(self.api_base_url.as_deref(), mode)
    }

    /// Configured storage path, falling back to `.kudos/storage.json`.
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH))
    }

    /// Translation scope selected by `auth_only_translation`.
    pub fn translation_scope(&self) -> TranslationScope {
        if self.auth_only_translation {
            TranslationScope::AuthOnly
        } else {
            TranslationScope::AllResources
        }
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing and base URL resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 4] = [
        "KUDOS_API_BASE_URL",
        "KUDOS_STORAGE_PATH",
        "KUDOS_EPHEMERAL_STORAGE",
        "KUDOS_AUTH_ONLY_TRANSLATION",
    ];

    fn load_from_empty_args() -> ClientSettings {
        ClientSettings::load_from_iter([OsString::from("kudos")]).expect("config should load")
    }

    #[rstest]
    #[case(Some("https://api.example.com/"), BuildMode::Release, "https://api.example.com")]
    #[case(Some("https://api.example.com//"), BuildMode::Debug, "https://api.example.com")]
    #[case(Some("   "), BuildMode::Debug, DEVELOPMENT_API_BASE_URL)]
    #[case(None, BuildMode::Debug, DEVELOPMENT_API_BASE_URL)]
    #[case(None, BuildMode::Release, "")]
    fn resolves_base_url(
        #[case] configured: Option<&str>,
        #[case] mode: BuildMode,
        #[case] expected: &str,
    ) {
        assert_eq!(ApiBaseUrl::resolve(configured, mode).as_str(), expected);
    }

    #[rstest]
    #[case("", "/users", "/users")]
    #[case("http://localhost:8080", "/tasks/upcoming", "http://localhost:8080/tasks/upcoming")]
    fn joins_endpoints(#[case] base: &str, #[case] path: &str, #[case] expected: &str) {
        assert_eq!(ApiBaseUrl::new(base).endpoint(path), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("https://kudos.example.com", true)]
    #[case("/api", false)]
    #[case("not a url", false)]
    fn validates_base_url(#[case] base: &str, #[case] valid: bool) {
        assert_eq!(ApiBaseUrl::new(base).validate().is_ok(), valid);
    }

    #[rstest]
    #[case(TranslationScope::AllResources, ResourceFamily::Tasks, true)]
    #[case(TranslationScope::AllResources, ResourceFamily::Auth, true)]
    #[case(TranslationScope::AuthOnly, ResourceFamily::Auth, true)]
    #[case(TranslationScope::AuthOnly, ResourceFamily::Users, false)]
    #[case(TranslationScope::AuthOnly, ResourceFamily::Compliments, false)]
    fn scope_coverage(
        #[case] scope: TranslationScope,
        #[case] family: ResourceFamily,
        #[case] expected: bool,
    ) {
        assert_eq!(scope.covers(family), expected);
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert!(settings.api_base_url.is_none());
        assert!(!settings.ephemeral_storage);
        assert_eq!(settings.storage_path(), PathBuf::from(DEFAULT_STORAGE_PATH));
        assert_eq!(settings.translation_scope(), TranslationScope::AllResources);
        assert_eq!(settings.api_base_url(BuildMode::Release).as_str(), "");
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("KUDOS_API_BASE_URL", Some("https://kudos.example.com/".to_owned())),
            ("KUDOS_STORAGE_PATH", Some("/tmp/kudos/state.json".to_owned())),
            ("KUDOS_EPHEMERAL_STORAGE", Some("true".to_owned())),
            ("KUDOS_AUTH_ONLY_TRANSLATION", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url(BuildMode::Debug).as_str(),
            "https://kudos.example.com"
        );
        assert_eq!(settings.storage_path(), PathBuf::from("/tmp/kudos/state.json"));
        assert!(settings.ephemeral_storage);
        assert_eq!(settings.translation_scope(), TranslationScope::AuthOnly);
    }
}
