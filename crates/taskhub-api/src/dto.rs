//! Request payloads and query strings

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use taskhub_core::domain::{
    SortOrder, TaskChanges, TaskFilter, TaskPriority, TaskSortField, TaskStatus,
};
use taskhub_shared::Pagination;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3 to 50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Body of task create and full update.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1 to 200 characters"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// RFC 3339 timestamp.
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
}

impl From<TaskRequest> for TaskChanges {
    fn from(req: TaskRequest) -> Self {
        TaskChanges {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority: req.priority,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct StatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TaskListQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
    #[validate(range(min = 5, max = 100, message = "page_size must be between 5 and 100"))]
    pub page_size: Option<u32>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub sort_by: Option<TaskSortField>,
    pub order: Option<SortOrder>,
}

impl From<TaskListQuery> for TaskFilter {
    fn from(query: TaskListQuery) -> Self {
        TaskFilter {
            status: query.status,
            priority: query.priority,
            sort_by: query.sort_by.unwrap_or_default(),
            order: query.order.unwrap_or_default(),
            pagination: Pagination::new(query.page, query.page_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let filter = TaskFilter::from(TaskListQuery::default());
        assert_eq!(filter.pagination, Pagination { page: 1, page_size: 10 });
        assert_eq!(filter.sort_by, TaskSortField::CreatedAt);
        assert_eq!(filter.order, SortOrder::Desc);
    }

    #[test]
    fn list_query_parses_sort_options() {
        let query: TaskListQuery =
            serde_json::from_value(serde_json::json!({ "sort_by": "due_date", "order": "asc" }))
                .unwrap();
        let filter = TaskFilter::from(query);
        assert_eq!(filter.sort_by, TaskSortField::DueDate);
        assert_eq!(filter.order, SortOrder::Asc);

        let bad = serde_json::from_value::<TaskListQuery>(serde_json::json!({ "sort_by": "owner" }));
        assert!(bad.is_err());
    }

    #[test]
    fn list_query_bounds() {
        let query = TaskListQuery { page_size: Some(4), ..Default::default() };
        assert!(query.validate().is_err());
        let query = TaskListQuery { page_size: Some(101), ..Default::default() };
        assert!(query.validate().is_err());
        let query = TaskListQuery { page: Some(0), ..Default::default() };
        assert!(query.validate().is_err());
        let query = TaskListQuery { page: Some(2), page_size: Some(100), ..Default::default() };
        assert!(query.validate().is_ok());
    }

    #[test]
    fn register_password_minimum() {
        let req = RegisterRequest {
            username: "alice".into(),
            email: "alice@example.com".into(),
            password: "12345".into(),
        };
        assert!(req.validate().is_err());
    }
}
