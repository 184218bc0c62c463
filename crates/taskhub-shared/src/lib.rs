//! # TaskHub Shared
//! 
//! Shared configuration, types, constants and telemetry for TaskHub.

pub mod constants;
pub mod types;
pub mod utils;
pub mod telemetry;
pub mod config;
pub mod duration;
pub mod error;

pub use types::*;
pub use error::AppError;
