//! Driven port for the authentication endpoints.
//!
//! Login and registration are the only unauthenticated calls. Successful
//! replies populate the session store; logout clears it.

use async_trait::async_trait;

use crate::domain::{ApiResult, AuthResponse, LoginCredentials, Registration};

/// Port for signing in, registering a tenant, and signing out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token and persist the session.
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthResponse>;

    /// Create a tenant with its first user and persist the session.
    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse>;

    /// Forget the current session. Makes no network call.
    fn logout(&self) -> ApiResult<()>;
}
