// ============================================================================
// TaskHub Core - Task Entity
// File: crates/taskhub-core/src/domain/task.rs
// Description: To-do task owned by a single user
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use taskhub_shared::{EntityId, PageMeta, Pagination};

/// Task priority enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(TaskPriority::Low),
            "medium" => Some(TaskPriority::Medium),
            "high" => Some(TaskPriority::High),
            _ => None,
        }
    }

    /// Ordering used when sorting by priority (low < medium < high).
    pub fn rank(&self) -> u8 {
        match self {
            TaskPriority::Low => 0,
            TaskPriority::Medium => 1,
            TaskPriority::High => 2,
        }
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Task status enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(TaskStatus::Todo),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
    pub status: TaskStatus,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip)]
    pub removed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Overwrites the editable fields. A missing priority keeps the current one.
    pub fn apply(&mut self, changes: TaskChanges) {
        self.title = changes.title;
        self.description = changes.description;
        self.due_date = changes.due_date;
        if let Some(priority) = changes.priority {
            self.priority = priority;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

/// A task about to be inserted; new tasks always start as `todo`.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewTask {
    pub user_id: EntityId,

    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,

    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: TaskPriority,
}

impl NewTask {
    pub fn new(
        user_id: EntityId,
        title: String,
        description: String,
        due_date: Option<DateTime<Utc>>,
        priority: Option<TaskPriority>,
    ) -> Result<Self, validator::ValidationErrors> {
        let task = Self {
            user_id,
            title,
            description,
            due_date,
            priority: priority.unwrap_or_default(),
        };
        task.validate()?;
        Ok(task)
    }
}

/// Full replacement of a task's editable fields.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct TaskChanges {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskSortField {
    #[default]
    CreatedAt,
    DueDate,
    Priority,
    Title,
}

impl TaskSortField {
    /// SQL ordering expression. Priority sorts by rank, not alphabetically.
    pub fn sql_expr(&self) -> &'static str {
        match self {
            TaskSortField::CreatedAt => "created_at",
            TaskSortField::DueDate => "due_date",
            TaskSortField::Priority => {
                "CASE priority WHEN 'low' THEN 0 WHEN 'medium' THEN 1 ELSE 2 END"
            }
            TaskSortField::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filtering, sorting and paging options for listing a user's tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub sort_by: TaskSortField,
    pub order: SortOrder,
    pub pagination: Pagination,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub pagination: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        let now = Utc::now();
        Task {
            id: 1,
            user_id: 7,
            title: "Write report".into(),
            description: String::new(),
            due_date: None,
            priority: TaskPriority::High,
            status: TaskStatus::Todo,
            created_at: now,
            updated_at: now,
            removed_at: None,
        }
    }

    #[test]
    fn test_new_task_defaults() {
        let task = NewTask::new(1, "Buy milk".into(), String::new(), None, None).unwrap();
        assert_eq!(task.priority, TaskPriority::Medium);
    }

    #[test]
    fn test_title_length_is_validated() {
        assert!(NewTask::new(1, String::new(), String::new(), None, None).is_err());
        assert!(NewTask::new(1, "x".repeat(201), String::new(), None, None).is_err());
        assert!(NewTask::new(1, "x".repeat(200), String::new(), None, None).is_ok());
    }

    #[test]
    fn test_apply_keeps_priority_when_omitted() {
        let mut task = sample_task();
        task.apply(TaskChanges {
            title: "Rewrite report".into(),
            description: "v2".into(),
            due_date: None,
            priority: None,
        });
        assert_eq!(task.title, "Rewrite report");
        assert_eq!(task.priority, TaskPriority::High);
    }

    #[test]
    fn test_enum_round_trip_strings() {
        for s in ["todo", "in_progress", "completed"] {
            assert_eq!(TaskStatus::from_str(s).unwrap().as_str(), s);
        }
        for p in ["low", "medium", "high"] {
            assert_eq!(TaskPriority::from_str(p).unwrap().as_str(), p);
        }
        assert!(TaskStatus::from_str("done").is_none());
    }

    #[test]
    fn test_filter_matches() {
        let task = sample_task();
        let mut filter = TaskFilter::default();
        assert!(filter.matches(&task));
        filter.status = Some(TaskStatus::Completed);
        assert!(!filter.matches(&task));
        filter.status = None;
        filter.priority = Some(TaskPriority::High);
        assert!(filter.matches(&task));
    }
}
