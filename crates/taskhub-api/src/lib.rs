//! # TaskHub API
//! 
//! HTTP handlers, middleware, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::build_router;
pub use state::{AppState, GateSettings};
