//! Driven port for client-local persistent storage.
//!
//! The session store and locale preference only ever need string values
//! under fixed keys, so the port mirrors a browser `localStorage` surface.
//! Adapters decide where the bytes live (memory, a JSON file, a keychain).

use super::define_port_error;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key holding the signed-in user's id.
pub const USER_ID_KEY: &str = "user_id";
/// Storage key holding the signed-in user's display name.
pub const USER_NAME_KEY: &str = "user_name";
/// Storage key holding the signed-in user's tenant id.
pub const TENANT_ID_KEY: &str = "tenant_id";
/// Storage key holding the selected locale code.
pub const LOCALE_KEY: &str = "locale";

define_port_error! {
    /// Errors surfaced by key-value storage adapters.
    pub enum KeyValueStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } =>
            "storage unavailable: {message}",
        /// Stored data exists but cannot be interpreted.
        Corrupt { message: String } =>
            "storage corrupt: {message}",
    }
}

/// Port for string-valued, key-addressed persistent storage.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
