//! Task repository trait (port)

use async_trait::async_trait;

use taskhub_shared::EntityId;

use crate::domain::{NewTask, Task, TaskFilter, TaskPage};
use crate::error::DomainError;

/// Every query is scoped by owner; soft-deleted tasks are never returned.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError>;
    async fn find_owned(&self, id: EntityId, user_id: EntityId) -> Result<Option<Task>, DomainError>;

    /// Persists the editable fields and status of an owned task.
    /// Returns `TaskNotFound` if the row vanished in the meantime.
    async fn update(&self, task: &Task) -> Result<Task, DomainError>;

    async fn soft_delete(&self, id: EntityId, user_id: EntityId) -> Result<bool, DomainError>;
    async fn list(&self, user_id: EntityId, filter: &TaskFilter) -> Result<TaskPage, DomainError>;
}
