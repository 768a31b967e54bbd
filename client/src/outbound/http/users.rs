//! Users adapter for `/users`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use super::transport::{ApiTransport, Authentication, ResourceFamily};
use crate::domain::ports::UsersApi;
use crate::domain::{ApiResult, NewUser, User, UserId};

const FAMILY: ResourceFamily = ResourceFamily::Users;

/// `UsersApi` backed by the HTTP transport.
pub struct HttpUsersApi {
    transport: Arc<ApiTransport>,
}

impl HttpUsersApi {
    /// Build the adapter over a shared transport.
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl UsersApi for HttpUsersApi {
    #[instrument(skip(self))]
    async fn list(&self) -> ApiResult<Vec<User>> {
        let request = self
            .transport
            .request(Method::GET, "/users", Authentication::Bearer)?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch users")
            .await
    }

    #[instrument(skip(self))]
    async fn ranking(&self) -> ApiResult<Vec<User>> {
        let request =
            self.transport
                .request(Method::GET, "/users/ranking", Authentication::Bearer)?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch ranking")
            .await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: UserId) -> ApiResult<User> {
        let request = self.transport.request(
            Method::GET,
            &format!("/users/{id}"),
            Authentication::Bearer,
        )?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch user")
            .await
    }

    #[instrument(skip_all, fields(email = %user.email, tenant_id = %user.tenant_id))]
    async fn create(&self, user: &NewUser) -> ApiResult<User> {
        let request = self
            .transport
            .request(Method::POST, "/users", Authentication::Bearer)?
            .json(&user.body());
        self.transport
            .send_json(request, FAMILY, "Failed to create user")
            .await
    }
}
