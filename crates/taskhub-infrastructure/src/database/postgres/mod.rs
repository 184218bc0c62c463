//! PostgreSQL repository implementations

pub mod task_repo_impl;
pub mod user_repo_impl;

pub use task_repo_impl::PgTaskRepository;
pub use user_repo_impl::PgUserRepository;

use taskhub_core::error::DomainError;
use tracing::error;

/// Maps a driver error to `DomainError::DatabaseError`, logging the context.
pub(crate) fn db_error(context: &'static str) -> impl Fn(sqlx::Error) -> DomainError {
    move |e| {
        error!("Database error {}: {}", context, e);
        DomainError::DatabaseError(e.to_string())
    }
}
