//! Compliments adapter for `/api/v1/compliments`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use super::transport::{ApiTransport, Authentication, ResourceFamily};
use crate::domain::ports::ComplimentsApi;
use crate::domain::{
    ApiResult, Compliment, ComplimentId, ComplimentWithSender, MarkViewed, NewCompliment,
};

const COMPLIMENTS_PATH: &str = "/api/v1/compliments";
const FAMILY: ResourceFamily = ResourceFamily::Compliments;

/// `ComplimentsApi` backed by the HTTP transport.
pub struct HttpComplimentsApi {
    transport: Arc<ApiTransport>,
}

impl HttpComplimentsApi {
    /// Build the adapter over a shared transport.
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    fn request(&self, method: Method, suffix: &str) -> ApiResult<reqwest::RequestBuilder> {
        self.transport.request(
            method,
            &format!("{COMPLIMENTS_PATH}{suffix}"),
            Authentication::Bearer,
        )
    }
}

#[async_trait]
impl ComplimentsApi for HttpComplimentsApi {
    #[instrument(skip_all, fields(to_user_id = %compliment.to_user_id()))]
    async fn create(&self, compliment: &NewCompliment) -> ApiResult<Compliment> {
        let request = self.request(Method::POST, "")?.json(compliment);
        self.transport
            .send_json(request, FAMILY, "Failed to create compliment")
            .await
    }

    #[instrument(skip(self))]
    async fn list(&self) -> ApiResult<Vec<Compliment>> {
        let request = self.request(Method::GET, "")?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch compliments")
            .await
    }

    #[instrument(skip(self))]
    async fn get(&self, id: ComplimentId) -> ApiResult<Compliment> {
        let request = self.request(Method::GET, &format!("/{id}"))?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch compliment")
            .await
    }

    #[instrument(skip(self))]
    async fn last_received(&self) -> ApiResult<Option<ComplimentWithSender>> {
        let request = self.request(Method::GET, "/last-received")?;
        self.transport
            .send_optional(request, FAMILY, "Failed to fetch last compliment")
            .await
    }

    #[instrument(skip(self))]
    async fn history(&self) -> ApiResult<Vec<ComplimentWithSender>> {
        let request = self.request(Method::GET, "/history")?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch compliment history")
            .await
    }

    #[instrument(skip(self))]
    async fn unviewed(&self) -> ApiResult<Vec<ComplimentWithSender>> {
        let request = self.request(Method::GET, "/unviewed")?;
        self.transport
            .send_json(request, FAMILY, "Failed to fetch unviewed compliments")
            .await
    }

    #[instrument(skip(self), fields(count = ids.len()))]
    async fn mark_viewed(&self, ids: &[ComplimentId]) -> ApiResult<()> {
        let body = MarkViewed { ids: ids.to_vec() };
        let request = self.request(Method::POST, "/mark-viewed")?.json(&body);
        self.transport
            .send_empty(request, FAMILY, "Failed to mark compliments as viewed")
            .await
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ComplimentId) -> ApiResult<()> {
        let request = self.request(Method::DELETE, &format!("/{id}"))?;
        self.transport
            .send_empty(request, FAMILY, "Failed to delete compliment")
            .await
    }
}
