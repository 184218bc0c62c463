//! HTTP middleware

pub mod auth;
pub mod request_log;

pub use auth::{require_session, CurrentUser};
pub use request_log::log_requests;
