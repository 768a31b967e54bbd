//! Authentication adapter.
//!
//! Login and registration are sent without a bearer token. A successful
//! reply is written to the session store before it is returned, so callers
//! observe a signed-in client as soon as the future resolves.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, instrument};

use super::transport::{ApiTransport, Authentication, ResourceFamily};
use crate::domain::ports::AuthApi;
use crate::domain::{ApiResult, AuthResponse, LoginCredentials, Registration};

const LOGIN_PATH: &str = "/api/v1/auth/login";
const REGISTER_PATH: &str = "/api/v1/auth/register";

/// `AuthApi` backed by the HTTP transport.
pub struct HttpAuthApi {
    transport: Arc<ApiTransport>,
}

impl HttpAuthApi {
    /// Build the adapter over a shared transport.
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    fn remember(&self, reply: &AuthResponse) -> ApiResult<()> {
        self.transport.sessions().save_session(&reply.session())?;
        info!(user_id = %reply.user_id, tenant_id = %reply.tenant_id, "session started");
        Ok(())
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[instrument(skip_all, fields(email = credentials.email()))]
    async fn login(&self, credentials: &LoginCredentials) -> ApiResult<AuthResponse> {
        let request = self
            .transport
            .request(Method::POST, LOGIN_PATH, Authentication::Anonymous)?
            .json(&credentials.body());
        let reply: AuthResponse = self
            .transport
            .send_json(request, ResourceFamily::Auth, "Login failed")
            .await?;
        self.remember(&reply)?;
        Ok(reply)
    }

    #[instrument(skip_all, fields(email = %registration.email, domain = %registration.tenant_domain))]
    async fn register(&self, registration: &Registration) -> ApiResult<AuthResponse> {
        let request = self
            .transport
            .request(Method::POST, REGISTER_PATH, Authentication::Anonymous)?
            .json(&registration.body());
        let reply: AuthResponse = self
            .transport
            .send_json(request, ResourceFamily::Auth, "Registration failed")
            .await?;
        self.remember(&reply)?;
        Ok(reply)
    }

    fn logout(&self) -> ApiResult<()> {
        self.transport.sessions().clear_session()?;
        info!("session cleared");
        Ok(())
    }
}
