//! Repository traits (ports)

pub mod task_repository;
pub mod user_repository;

pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use task_repository::MockTaskRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
