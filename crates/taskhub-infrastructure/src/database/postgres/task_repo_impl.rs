// ============================================================================
// TaskHub Infrastructure - PostgreSQL Task Repository
// File: crates/taskhub-infrastructure/src/database/postgres/task_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use taskhub_core::domain::{NewTask, Task, TaskFilter, TaskPage, TaskPriority, TaskStatus};
use taskhub_core::error::DomainError;
use taskhub_core::repositories::TaskRepository;
use taskhub_shared::{EntityId, PageMeta};

use super::db_error;

pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TaskRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            priority: TaskPriority::from_str(&row.priority).unwrap_or_default(),
            status: TaskStatus::from_str(&row.status).unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
            removed_at: row.removed_at,
        }
    }
}

const TASK_COLUMNS: &str = "id, user_id, title, description, due_date, priority, status, \
                            created_at, updated_at, removed_at";

/// Appends the owner scope and the optional status/priority filters.
fn push_scope(builder: &mut QueryBuilder<'_, Postgres>, user_id: EntityId, filter: &TaskFilter) {
    builder.push(" WHERE removed_at IS NULL AND user_id = ");
    builder.push_bind(user_id);
    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    if let Some(priority) = filter.priority {
        builder.push(" AND priority = ");
        builder.push_bind(priority.as_str());
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn create(&self, task: &NewTask) -> Result<Task, DomainError> {
        let row: TaskRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO tasks (user_id, title, description, due_date, priority, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(TaskStatus::default().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("creating task"))?;

        Ok(row.into())
    }

    async fn find_owned(&self, id: EntityId, user_id: EntityId) -> Result<Option<Task>, DomainError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1 AND user_id = $2 AND removed_at IS NULL"
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("finding task"))?;

        Ok(row.map(Into::into))
    }

    async fn update(&self, task: &Task) -> Result<Task, DomainError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            r#"
            UPDATE tasks
            SET title = $3, description = $4, due_date = $5,
                priority = $6, status = $7, updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND removed_at IS NULL
            RETURNING {TASK_COLUMNS}
            "#
        ))
        .bind(task.id)
        .bind(task.user_id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("updating task"))?;

        row.map(Into::into).ok_or(DomainError::TaskNotFound)
    }

    async fn soft_delete(&self, id: EntityId, user_id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET removed_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND user_id = $2 AND removed_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("deleting task"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, user_id: EntityId, filter: &TaskFilter) -> Result<TaskPage, DomainError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM tasks");
        push_scope(&mut count, user_id, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("counting tasks"))?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {TASK_COLUMNS} FROM tasks"));
        push_scope(&mut select, user_id, filter);
        // sort_by and order come from closed enums, never from raw input.
        let direction = filter.order.as_sql();
        select.push(format!(
            " ORDER BY {} {direction}, id {direction} LIMIT ",
            filter.sort_by.sql_expr()
        ));
        select.push_bind(filter.pagination.limit());
        select.push(" OFFSET ");
        select.push_bind(filter.pagination.offset());

        let rows: Vec<TaskRow> = select
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("listing tasks"))?;

        debug!(user_id, total, returned = rows.len(), "Listed tasks");
        Ok(TaskPage {
            tasks: rows.into_iter().map(Into::into).collect(),
            pagination: PageMeta::new(filter.pagination, total),
        })
    }
}
