//! Tenant members and their accumulated points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::ids::{TenantId, UserId};

const DEFAULT_ROLE: &str = "user";
const DEFAULT_STATUS: &str = "active";

/// A user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub tenant_id: TenantId,
    pub points: i32,
    pub role: String,
    pub status: String,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Input for `POST /users`.
///
/// Unset points, role, and status default to `0`, `user`, and `active`.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub tenant_id: TenantId,
    pub points: Option<i32>,
    pub role: Option<String>,
    pub status: Option<String>,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("tenant_id", &self.tenant_id)
            .field("points", &self.points)
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}

/// Wire body for user creation with defaults applied.
#[derive(Debug, Serialize)]
pub(crate) struct NewUserBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    tenant_id: TenantId,
    points: i32,
    role: &'a str,
    status: &'a str,
}

impl NewUser {
    pub(crate) fn body(&self) -> NewUserBody<'_> {
        NewUserBody {
            name: &self.name,
            email: &self.email,
            password: self.password.as_str(),
            tenant_id: self.tenant_id,
            points: self.points.unwrap_or(0),
            role: self.role.as_deref().unwrap_or(DEFAULT_ROLE),
            status: self.status.as_deref().unwrap_or(DEFAULT_STATUS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_user() -> NewUser {
        NewUser {
            name: "Bia".to_owned(),
            email: "bia@example.com".to_owned(),
            password: Zeroizing::new("hunter22".to_owned()),
            tenant_id: TenantId::new(3),
            points: None,
            role: None,
            status: None,
        }
    }

    #[test]
    fn applies_creation_defaults() {
        let body = serde_json::to_value(new_user().body()).expect("serialise");
        assert_eq!(
            body,
            json!({
                "name": "Bia",
                "email": "bia@example.com",
                "password": "hunter22",
                "tenant_id": 3,
                "points": 0,
                "role": "user",
                "status": "active"
            })
        );
    }

    #[test]
    fn explicit_values_override_defaults() {
        let mut user = new_user();
        user.points = Some(12);
        user.role = Some("admin".to_owned());
        let body = serde_json::to_value(user.body()).expect("serialise");
        assert_eq!(body["points"], 12);
        assert_eq!(body["role"], "admin");
        assert_eq!(body["status"], "active");
    }

    #[test]
    fn debug_output_hides_password() {
        assert!(!format!("{:?}", new_user()).contains("hunter22"));
    }
}
