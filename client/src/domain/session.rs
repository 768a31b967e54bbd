//! Session persistence: who is signed in, and with which token.
//!
//! The session is four values written under fixed storage keys. They are
//! written and cleared as a set while holding an in-process lock, so readers
//! in this process never observe a half-written session. Concurrent writers
//! are not ordered beyond that: the last `save_session`/`clear_session` to
//! take the lock wins.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::warn;
use zeroize::Zeroizing;

use super::ids::{TenantId, UserId};
use super::localization::Localizer;
use super::ports::{
    KeyValueStore, KeyValueStoreError, TENANT_ID_KEY, TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY,
};

/// Token first, so a failed clear never leaves a token behind.
const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, USER_ID_KEY, USER_NAME_KEY, TENANT_ID_KEY];

/// Opaque bearer credential.
///
/// The buffer is wiped on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the raw token for header construction.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Everything persisted for a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token sent on authenticated requests.
    pub token: BearerToken,
    /// Signed-in user.
    pub user_id: UserId,
    /// Display name reported at sign-in.
    pub user_name: String,
    /// Tenant the user belongs to.
    pub tenant_id: TenantId,
}

impl Session {
    /// Assemble a session from the values returned by login or registration.
    pub fn new(
        token: BearerToken,
        user_id: UserId,
        user_name: impl Into<String>,
        tenant_id: TenantId,
    ) -> Self {
        Self {
            token,
            user_id,
            user_name: user_name.into(),
            tenant_id,
        }
    }
}

/// Minimal identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Signed-in user.
    pub id: UserId,
    /// Display name, or the locale's placeholder when none was stored.
    pub name: String,
    /// Tenant the user belongs to.
    pub tenant_id: TenantId,
}

/// Single source of truth for the current session.
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
    localizer: Arc<Localizer>,
    lock: Mutex<()>,
}

impl SessionStore {
    /// Build a session store over `store`, using `localizer` for placeholders.
    pub fn new(store: Arc<dyn KeyValueStore>, localizer: Arc<Localizer>) -> Self {
        Self {
            store,
            localizer,
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist all four session values.
    ///
    /// The token is written last. If any write fails, every session key is
    /// removed before the error is returned, leaving the user signed out.
    pub fn save_session(&self, session: &Session) -> Result<(), KeyValueStoreError> {
        let _guard = self.guard();
        let user_id = session.user_id.get().to_string();
        let tenant_id = session.tenant_id.get().to_string();
        let entries = [
            (USER_ID_KEY, user_id.as_str()),
            (USER_NAME_KEY, session.user_name.as_str()),
            (TENANT_ID_KEY, tenant_id.as_str()),
            (TOKEN_KEY, session.token.expose()),
        ];
        for (key, value) in entries {
            if let Err(error) = self.store.set(key, value) {
                warn!(%error, key, "session write failed; discarding partial session");
                self.discard_all();
                return Err(error);
            }
        }
        Ok(())
    }

    /// Best-effort removal of every session key. Caller holds the guard.
    fn discard_all(&self) {
        for key in SESSION_KEYS {
            if let Err(error) = self.store.remove(key) {
                warn!(%error, key, "failed to remove session key");
            }
        }
    }

    /// Current bearer token, if signed in.
    pub fn token(&self) -> Result<Option<BearerToken>, KeyValueStoreError> {
        let _guard = self.guard();
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|raw| !raw.is_empty())
            .map(BearerToken::new))
    }

    /// Identity of the signed-in user.
    ///
    /// Requires a user id and a tenant id; a missing name becomes the active
    /// locale's default placeholder. Unparseable ids read as signed out.
    pub fn current_identity(&self) -> Result<Option<Identity>, KeyValueStoreError> {
        let (raw_id, raw_name, raw_tenant) = {
            let _guard = self.guard();
            (
                self.store.get(USER_ID_KEY)?,
                self.store.get(USER_NAME_KEY)?,
                self.store.get(TENANT_ID_KEY)?,
            )
        };

        let (Some(raw_id), Some(raw_tenant)) = (raw_id, raw_tenant) else {
            return Ok(None);
        };
        let (Ok(id), Ok(tenant_id)) = (raw_id.parse::<UserId>(), raw_tenant.parse::<TenantId>())
        else {
            warn!(user_id = %raw_id, tenant_id = %raw_tenant, "invalid ids in stored session");
            return Ok(None);
        };

        let name = raw_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| self.localizer.t("common.defaultUserName"));
        Ok(Some(Identity {
            id,
            name,
            tenant_id,
        }))
    }

    /// Whether a token is present.
    ///
    /// Storage failures are logged and reported as signed out.
    pub fn has_session(&self) -> bool {
        match self.token() {
            Ok(token) => token.is_some(),
            Err(error) => {
                warn!(%error, "session lookup failed; treating as signed out");
                false
            }
        }
    }

    /// Remove every session value.
    pub fn clear_session(&self) -> Result<(), KeyValueStoreError> {
        let _guard = self.guard();
        for key in SESSION_KEYS {
            self.store.remove(key)?;
        }
        Ok(())
    }
}
