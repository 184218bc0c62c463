//! Task service: owner-scoped CRUD over the task store

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use taskhub_shared::EntityId;

use crate::domain::{NewTask, Task, TaskChanges, TaskFilter, TaskPage, TaskStatus};
use crate::error::DomainError;
use crate::repositories::TaskRepository;

pub struct TaskService<R: TaskRepository + ?Sized> {
    task_repo: Arc<R>,
}

impl<R: TaskRepository + ?Sized> TaskService<R> {
    pub fn new(task_repo: Arc<R>) -> Self {
        Self { task_repo }
    }

    pub async fn create(&self, user_id: EntityId, draft: TaskChanges) -> Result<Task, DomainError> {
        let new_task = NewTask::new(
            user_id,
            draft.title,
            draft.description,
            draft.due_date,
            draft.priority,
        )?;
        let task = self.task_repo.create(&new_task).await?;
        info!(user_id, task_id = task.id, "Task created");
        Ok(task)
    }

    pub async fn get(&self, id: EntityId, user_id: EntityId) -> Result<Task, DomainError> {
        self.task_repo.find_owned(id, user_id).await?.ok_or_else(|| {
            debug!(user_id, task_id = id, "Task not found for owner");
            DomainError::TaskNotFound
        })
    }

    /// Replaces title, description and due date. Priority changes only when given.
    pub async fn update(
        &self,
        id: EntityId,
        user_id: EntityId,
        changes: TaskChanges,
    ) -> Result<Task, DomainError> {
        changes.validate()?;
        let mut task = self.get(id, user_id).await?;
        task.apply(changes);
        let task = self.task_repo.update(&task).await?;
        info!(user_id, task_id = id, "Task updated");
        Ok(task)
    }

    pub async fn update_status(
        &self,
        id: EntityId,
        user_id: EntityId,
        status: TaskStatus,
    ) -> Result<Task, DomainError> {
        let mut task = self.get(id, user_id).await?;
        task.status = status;
        let task = self.task_repo.update(&task).await?;
        info!(user_id, task_id = id, status = status.as_str(), "Task status changed");
        Ok(task)
    }

    pub async fn delete(&self, id: EntityId, user_id: EntityId) -> Result<(), DomainError> {
        if !self.task_repo.soft_delete(id, user_id).await? {
            warn!(user_id, task_id = id, "Delete of missing task");
            return Err(DomainError::TaskNotFound);
        }
        info!(user_id, task_id = id, "Task deleted");
        Ok(())
    }

    pub async fn list(&self, user_id: EntityId, filter: &TaskFilter) -> Result<TaskPage, DomainError> {
        self.task_repo.list(user_id, filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskPriority;
    use crate::repositories::MockTaskRepository;
    use chrono::Utc;
    use taskhub_shared::{PageMeta, Pagination};

    fn task(id: EntityId, user_id: EntityId) -> Task {
        let now = Utc::now();
        Task {
            id,
            user_id,
            title: "Write report".into(),
            description: String::new(),
            due_date: None,
            priority: TaskPriority::Medium,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
            removed_at: None,
        }
    }

    fn changes(title: &str, priority: Option<TaskPriority>) -> TaskChanges {
        TaskChanges {
            title: title.to_string(),
            description: "details".into(),
            due_date: None,
            priority,
        }
    }

    #[tokio::test]
    async fn create_defaults_priority() {
        let mut repo = MockTaskRepository::new();
        repo.expect_create()
            .withf(|t: &NewTask| t.user_id == 5 && t.priority == TaskPriority::Medium)
            .times(1)
            .returning(|t: &NewTask| {
                let mut created = task(1, t.user_id);
                created.title = t.title.clone();
                Ok(created)
            });

        let service = TaskService::new(Arc::new(repo));
        let created = service.create(5, changes("Buy milk", None)).await.unwrap();
        assert_eq!(created.title, "Buy milk");
    }

    #[tokio::test]
    async fn create_rejects_empty_title() {
        let mut repo = MockTaskRepository::new();
        repo.expect_create().never();

        let service = TaskService::new(Arc::new(repo));
        let err = service.create(5, changes("", None)).await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn get_of_foreign_task_is_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_owned()
            .withf(|id, user_id| *id == 1 && *user_id == 2)
            .returning(|_, _| Ok(None));

        let service = TaskService::new(Arc::new(repo));
        assert!(matches!(service.get(1, 2).await, Err(DomainError::TaskNotFound)));
    }

    #[tokio::test]
    async fn update_keeps_priority_when_omitted() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_owned().returning(|id, user_id| {
            let mut t = task(id, user_id);
            t.priority = TaskPriority::High;
            Ok(Some(t))
        });
        repo.expect_update()
            .withf(|t: &Task| t.title == "Renamed" && t.priority == TaskPriority::High)
            .returning(|t: &Task| Ok(t.clone()));

        let service = TaskService::new(Arc::new(repo));
        let updated = service.update(1, 1, changes("Renamed", None)).await.unwrap();
        assert_eq!(updated.description, "details");
    }

    #[tokio::test]
    async fn update_status_changes_only_status() {
        let mut repo = MockTaskRepository::new();
        repo.expect_find_owned().returning(|id, user_id| Ok(Some(task(id, user_id))));
        repo.expect_update().returning(|t: &Task| Ok(t.clone()));

        let service = TaskService::new(Arc::new(repo));
        let updated = service.update_status(1, 1, TaskStatus::Completed).await.unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, "Write report");
    }

    #[tokio::test]
    async fn delete_missing_task_is_not_found() {
        let mut repo = MockTaskRepository::new();
        repo.expect_soft_delete().returning(|id, _| Ok(id == 1));

        let service = TaskService::new(Arc::new(repo));
        assert!(service.delete(1, 1).await.is_ok());
        assert!(matches!(service.delete(2, 1).await, Err(DomainError::TaskNotFound)));
    }

    #[tokio::test]
    async fn list_passes_filter_through() {
        let mut repo = MockTaskRepository::new();
        repo.expect_list()
            .withf(|user_id, f: &TaskFilter| *user_id == 3 && f.status == Some(TaskStatus::Todo))
            .returning(|user_id, f: &TaskFilter| {
                Ok(TaskPage {
                    tasks: vec![task(1, user_id)],
                    pagination: PageMeta::new(f.pagination, 1),
                })
            });

        let service = TaskService::new(Arc::new(repo));
        let filter = TaskFilter {
            status: Some(TaskStatus::Todo),
            pagination: Pagination::new(Some(1), Some(10)),
            ..TaskFilter::default()
        };
        let page = service.list(3, &filter).await.unwrap();
        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.pagination.total_pages, 1);
    }
}
