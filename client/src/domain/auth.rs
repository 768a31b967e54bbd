//! Authentication payloads: credentials, registration, and the token reply.
//!
//! Passwords live in zeroising buffers and are only borrowed into the wire
//! body at send time.

use std::fmt;

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::ids::{TenantId, UserId};
use super::session::{BearerToken, Session};

/// Email/password pair for `POST /api/v1/auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials; the email is trimmed, the password kept verbatim.
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: Zeroizing::new(password.to_owned()),
        }
    }

    /// Email used to sign in.
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn body(&self) -> LoginBody<'_> {
        LoginBody {
            email: &self.email,
            password: self.password.as_str(),
        }
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// New tenant plus its first user, for `POST /api/v1/auth/register`.
#[derive(Clone)]
pub struct Registration {
    pub tenant_name: String,
    pub tenant_domain: String,
    pub user_name: String,
    pub email: String,
    pub password: Zeroizing<String>,
}

impl Registration {
    pub(crate) fn body(&self) -> RegistrationBody<'_> {
        RegistrationBody {
            tenant_name: &self.tenant_name,
            tenant_domain: &self.tenant_domain,
            user_name: &self.user_name,
            email: &self.email,
            password: self.password.as_str(),
        }
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("tenant_name", &self.tenant_name)
            .field("tenant_domain", &self.tenant_domain)
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RegistrationBody<'a> {
    tenant_name: &'a str,
    tenant_domain: &'a str,
    user_name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Successful login or registration reply.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: UserId,
    pub tenant_id: TenantId,
    pub email: String,
    pub name: String,
}

impl AuthResponse {
    /// Session to persist for this reply.
    pub fn session(&self) -> Session {
        Session::new(
            BearerToken::new(self.token.clone()),
            self.user_id,
            self.name.clone(),
            self.tenant_id,
        )
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("tenant_id", &self.tenant_id)
            .field("email", &self.email)
            .field("name", &self.name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn login_body_trims_email_only() {
        let creds = LoginCredentials::new("  ana@example.com ", " pass word ");
        assert_eq!(
            serde_json::to_value(creds.body()).expect("serialise"),
            json!({ "email": "ana@example.com", "password": " pass word " })
        );
    }

    #[test]
    fn auth_response_maps_to_session() {
        let response: AuthResponse = serde_json::from_value(json!({
            "token": "jwt",
            "user_id": 1,
            "tenant_id": 2,
            "email": "ana@example.com",
            "name": "Ana"
        }))
        .expect("decode");

        let session = response.session();
        assert_eq!(session.token.expose(), "jwt");
        assert_eq!(session.user_id, UserId::new(1));
        assert_eq!(session.user_name, "Ana");
        assert_eq!(session.tenant_id, TenantId::new(2));
        assert!(!format!("{response:?}").contains("jwt"));
    }
}
