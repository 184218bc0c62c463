//! # TaskHub Infrastructure
//! 
//! Record store implementations (adapters): PostgreSQL and in-memory.

pub mod database;
pub mod memory;

pub use database::{create_pool, run_migrations, PgTaskRepository, PgUserRepository};
pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
