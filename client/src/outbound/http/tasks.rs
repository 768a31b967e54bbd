//! Tasks adapter for `/tasks`.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use super::transport::{ApiTransport, Authentication, ResourceFamily};
use crate::domain::ports::TasksApi;
use crate::domain::{ApiResult, CompleteTask, NewTask, Task, TaskId, TaskWithCompleter, UserId};

const FAMILY: ResourceFamily = ResourceFamily::Tasks;

/// `TasksApi` backed by the HTTP transport.
pub struct HttpTasksApi {
    transport: Arc<ApiTransport>,
}

impl HttpTasksApi {
    /// Build the adapter over a shared transport.
    pub fn new(transport: Arc<ApiTransport>) -> Self {
        Self { transport }
    }

    fn request(&self, method: Method, path: &str) -> ApiResult<reqwest::RequestBuilder> {
        self.transport
            .request(method, path, Authentication::Bearer)
    }
}

#[async_trait]
impl TasksApi for HttpTasksApi {
    #[instrument(skip(self))]
    async fn upcoming(&self, limit: u32, offset: u32) -> ApiResult<Vec<Task>> {
        let request = self
            .request(Method::GET, "/tasks/upcoming")?
            .query(&[("limit", limit), ("offset", offset)]);
        self.transport
            .send_json(request, FAMILY, "Failed to fetch upcoming tasks")
            .await
    }

    #[instrument(skip(self))]
    async fn history(&self, limit: u32) -> ApiResult<Vec<TaskWithCompleter>> {
        let request = self
            .request(Method::GET, "/tasks/history")?
            .query(&[("limit", limit)]);
        self.transport
            .send_json(request, FAMILY, "Failed to fetch task history")
            .await
    }

    #[instrument(skip(self))]
    async fn completed_by_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<TaskWithCompleter>> {
        let request = self
            .request(Method::GET, &format!("/tasks/user/{user_id}/completed"))?
            .query(&[("limit", limit), ("offset", offset)]);
        self.transport
            .send_json(request, FAMILY, "Failed to fetch user task history")
            .await
    }

    #[instrument(skip_all, fields(title = %task.title))]
    async fn create(&self, task: &NewTask) -> ApiResult<Task> {
        let request = self.request(Method::POST, "/tasks")?.json(task);
        self.transport
            .send_json(request, FAMILY, "Failed to create task")
            .await
    }

    #[instrument(skip(self))]
    async fn complete(&self, id: TaskId, completed_by: Option<UserId>) -> ApiResult<Task> {
        let body = CompleteTask {
            completed_by_id: completed_by,
        };
        let request = self
            .request(Method::POST, &format!("/tasks/{id}/complete"))?
            .json(&body);
        self.transport
            .send_json(request, FAMILY, "Failed to complete task")
            .await
    }

    #[instrument(skip(self))]
    async fn undo(&self, id: TaskId) -> ApiResult<Task> {
        let request = self.request(Method::POST, &format!("/tasks/{id}/undo"))?;
        self.transport
            .send_json(request, FAMILY, "Failed to undo task")
            .await
    }
}
