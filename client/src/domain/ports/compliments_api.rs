//! Driven port for the compliments resource.

use async_trait::async_trait;

use crate::domain::{ApiResult, Compliment, ComplimentId, ComplimentWithSender, NewCompliment};

/// Port for sending, listing, and acknowledging compliments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplimentsApi: Send + Sync {
    /// Send a compliment from the signed-in user.
    async fn create(&self, compliment: &NewCompliment) -> ApiResult<Compliment>;

    /// Every compliment in the tenant.
    async fn list(&self) -> ApiResult<Vec<Compliment>>;

    /// One compliment by id.
    async fn get(&self, id: ComplimentId) -> ApiResult<Compliment>;

    /// Most recent compliment received by the signed-in user, if any.
    async fn last_received(&self) -> ApiResult<Option<ComplimentWithSender>>;

    /// Compliments sent or received by the signed-in user.
    async fn history(&self) -> ApiResult<Vec<ComplimentWithSender>>;

    /// Received compliments not yet marked viewed.
    async fn unviewed(&self) -> ApiResult<Vec<ComplimentWithSender>>;

    /// Mark received compliments as viewed.
    async fn mark_viewed(&self, ids: &[ComplimentId]) -> ApiResult<()>;

    /// Soft-delete a compliment.
    async fn delete(&self, id: ComplimentId) -> ApiResult<()>;
}
