//! Domain services (business logic)

pub mod auth_service;
pub mod task_service;

pub use auth_service::{AuthResult, AuthService, UserInfo};
pub use task_service::TaskService;
