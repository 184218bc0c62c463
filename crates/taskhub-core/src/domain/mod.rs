//! Domain entities

pub mod user;
pub mod task;

pub use user::{NewUser, User};
pub use task::{
    NewTask, SortOrder, Task, TaskChanges, TaskFilter, TaskPage, TaskPriority, TaskSortField,
    TaskStatus,
};
