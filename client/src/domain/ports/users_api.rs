//! Driven port for the users resource.

use async_trait::async_trait;

use crate::domain::{ApiResult, NewUser, User, UserId};

/// Port for listing, ranking, and creating tenant members.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Every user in the tenant.
    async fn list(&self) -> ApiResult<Vec<User>>;

    /// Users ordered by accumulated points.
    async fn ranking(&self) -> ApiResult<Vec<User>>;

    /// One user by id.
    async fn get(&self, id: UserId) -> ApiResult<User>;

    /// Add a user to a tenant.
    async fn create(&self, user: &NewUser) -> ApiResult<User>;
}
