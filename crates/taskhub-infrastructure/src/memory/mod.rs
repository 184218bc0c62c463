//! In-process record store, selected with `database.url = "memory://"`.
//!
//! Mirrors the PostgreSQL adapters: live-row uniqueness on username and
//! email, owner-scoped task access, and soft deletes. Contents are lost
//! when the process exits.

mod task_repo;
mod user_repo;

pub use task_repo::InMemoryTaskRepository;
pub use user_repo::InMemoryUserRepository;
