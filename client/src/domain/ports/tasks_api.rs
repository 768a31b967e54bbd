//! Driven port for the tasks resource.

use async_trait::async_trait;

use crate::domain::{ApiResult, NewTask, Task, TaskId, TaskWithCompleter, UserId};

/// Default page size for upcoming tasks.
pub const DEFAULT_UPCOMING_LIMIT: u32 = 5;
/// Default page size for the tenant completion history.
pub const DEFAULT_HISTORY_LIMIT: u32 = 5;
/// Default page size for one user's completion history.
pub const DEFAULT_USER_HISTORY_LIMIT: u32 = 20;

/// Port for scheduling, completing, and reviewing tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// Open tasks ordered by due date.
    async fn upcoming(&self, limit: u32, offset: u32) -> ApiResult<Vec<Task>>;

    /// Recently completed tasks across the tenant.
    async fn history(&self, limit: u32) -> ApiResult<Vec<TaskWithCompleter>>;

    /// Tasks completed by one user.
    async fn completed_by_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<TaskWithCompleter>>;

    /// Schedule a new task.
    async fn create(&self, task: &NewTask) -> ApiResult<Task>;

    /// Mark a task completed, crediting `completed_by` or the caller.
    async fn complete(&self, id: TaskId, completed_by: Option<UserId>) -> ApiResult<Task>;

    /// Revert a completion.
    async fn undo(&self, id: TaskId) -> ApiResult<Task>;
}
