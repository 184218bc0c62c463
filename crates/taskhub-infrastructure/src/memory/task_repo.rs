use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use taskhub_core::domain::{
    NewTask, SortOrder, Task, TaskFilter, TaskPage, TaskSortField, TaskStatus,
};
use taskhub_core::error::DomainError;
use taskhub_core::repositories::TaskRepository;
use taskhub_shared::{EntityId, PageMeta};

#[derive(Default)]
struct TaskTable {
    last_id: EntityId,
    rows: Vec<Task>,
}

#[derive(Default)]
pub struct InMemoryTaskRepository {
    table: RwLock<TaskTable>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Same ordering as the SQL adapter: missing due dates sort last when
/// ascending, ties broken by id.
fn compare(a: &Task, b: &Task, field: TaskSortField, order: SortOrder) -> Ordering {
    let primary = match field {
        TaskSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        TaskSortField::DueDate => match (a.due_date, b.due_date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        TaskSortField::Priority => a.priority.rank().cmp(&b.priority.rank()),
        TaskSortField::Title => a.title.cmp(&b.title),
    };
    let ordering = primary.then(a.id.cmp(&b.id));
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError> {
        let mut table = self.table.write();
        table.last_id += 1;
        let now = Utc::now();
        let created = Task {
            id: table.last_id,
            user_id: task.user_id,
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date,
            priority: task.priority,
            status: TaskStatus::default(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn find_owned(&self, id: EntityId, user_id: EntityId) -> Result<Option<Task>, DomainError> {
        Ok(self
            .table
            .read()
            .rows
            .iter()
            .find(|t| t.id == id && t.user_id == user_id && !t.is_deleted())
            .cloned())
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let mut table = self.table.write();
        let row = table
            .rows
            .iter_mut()
            .find(|t| t.id == task.id && t.user_id == task.user_id && !t.is_deleted())
            .ok_or(DomainError::TaskNotFound)?;

        row.title = task.title.clone();
        row.description = task.description.clone();
        row.due_date = task.due_date;
        row.priority = task.priority;
        row.status = task.status;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn soft_delete(&self, id: EntityId, user_id: EntityId) -> Result<bool, DomainError> {
        let mut table = self.table.write();
        match table
            .rows
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id && !t.is_deleted())
        {
            Some(task) => {
                let now = Utc::now();
                task.removed_at = Some(now);
                task.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, user_id: EntityId, filter: &TaskFilter) -> Result<TaskPage, DomainError> {
        let table = self.table.read();
        let mut matching: Vec<&Task> = table
            .rows
            .iter()
            .filter(|t| t.user_id == user_id && !t.is_deleted() && filter.matches(t))
            .collect();
        matching.sort_by(|a, b| compare(a, b, filter.sort_by, filter.order));

        let total = matching.len() as i64;
        let offset = usize::try_from(filter.pagination.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(filter.pagination.limit()).unwrap_or(usize::MAX);
        let tasks = matching.into_iter().skip(offset).take(limit).cloned().collect();

        Ok(TaskPage { tasks, pagination: PageMeta::new(filter.pagination, total) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use taskhub_core::domain::TaskPriority;
    use taskhub_shared::Pagination;

    async fn seed(repo: &InMemoryTaskRepository, user_id: EntityId, title: &str, p: TaskPriority) -> Task {
        let task = NewTask::new(user_id, title.into(), String::new(), None, Some(p)).unwrap();
        repo.create(&task).await.unwrap()
    }

    #[tokio::test]
    async fn tasks_are_scoped_to_their_owner() {
        let repo = InMemoryTaskRepository::new();
        let task = seed(&repo, 1, "mine", TaskPriority::Low).await;

        assert!(repo.find_owned(task.id, 1).await.unwrap().is_some());
        assert!(repo.find_owned(task.id, 2).await.unwrap().is_none());
        assert!(!repo.soft_delete(task.id, 2).await.unwrap());

        let mut foreign = task.clone();
        foreign.user_id = 2;
        assert!(matches!(repo.update(&foreign).await, Err(DomainError::TaskNotFound)));
    }

    #[tokio::test]
    async fn soft_deleted_tasks_disappear() {
        let repo = InMemoryTaskRepository::new();
        let task = seed(&repo, 1, "gone", TaskPriority::Low).await;

        assert!(repo.soft_delete(task.id, 1).await.unwrap());
        assert!(repo.find_owned(task.id, 1).await.unwrap().is_none());
        let page = repo.list(1, &TaskFilter::default()).await.unwrap();
        assert_eq!(page.pagination.total_items, 0);
    }

    #[tokio::test]
    async fn list_sorts_by_priority_rank_and_paginates() {
        let repo = InMemoryTaskRepository::new();
        seed(&repo, 1, "b", TaskPriority::High).await;
        seed(&repo, 1, "a", TaskPriority::Low).await;
        seed(&repo, 1, "c", TaskPriority::Medium).await;
        for i in 0..4 {
            seed(&repo, 1, &format!("extra {i}"), TaskPriority::Low).await;
        }
        seed(&repo, 2, "other owner", TaskPriority::High).await;

        let filter = TaskFilter {
            sort_by: TaskSortField::Priority,
            order: SortOrder::Desc,
            pagination: Pagination::new(Some(1), Some(5)),
            ..TaskFilter::default()
        };
        let page = repo.list(1, &filter).await.unwrap();
        assert_eq!(page.pagination.total_items, 7);
        assert_eq!(page.pagination.total_pages, 2);
        assert_eq!(page.tasks.len(), 5);
        assert_eq!(page.tasks[0].title, "b");
        assert_eq!(page.tasks[1].title, "c");

        let second = TaskFilter { pagination: Pagination::new(Some(2), Some(5)), ..filter };
        assert_eq!(repo.list(1, &second).await.unwrap().tasks.len(), 2);
    }

    #[tokio::test]
    async fn list_filters_by_status_and_priority() {
        let repo = InMemoryTaskRepository::new();
        let mut done = seed(&repo, 1, "done", TaskPriority::High).await;
        seed(&repo, 1, "open", TaskPriority::High).await;
        done.status = TaskStatus::Completed;
        repo.update(&done).await.unwrap();

        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            priority: Some(TaskPriority::High),
            ..TaskFilter::default()
        };
        let page = repo.list(1, &filter).await.unwrap();
        assert_eq!(page.tasks.len(), 1);
        assert_eq!(page.tasks[0].title, "done");
    }

    #[tokio::test]
    async fn missing_due_dates_sort_last_ascending() {
        let repo = InMemoryTaskRepository::new();
        let now = Utc::now();
        for (title, due) in [("none", None), ("later", Some(now + Duration::days(2))), ("soon", Some(now))] {
            let task = NewTask::new(1, title.into(), String::new(), due, None).unwrap();
            repo.create(&task).await.unwrap();
        }

        let filter = TaskFilter {
            sort_by: TaskSortField::DueDate,
            order: SortOrder::Asc,
            ..TaskFilter::default()
        };
        let titles: Vec<String> = repo
            .list(1, &filter)
            .await
            .unwrap()
            .tasks
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, ["soon", "later", "none"]);
    }
}
