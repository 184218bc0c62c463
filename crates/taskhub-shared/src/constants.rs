//! Application-wide constants

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

pub const DEFAULT_SESSION_TTL: &str = "24h";
pub const DEFAULT_SWEEP_INTERVAL: &str = "1h";
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Raw entropy of a session identifier, before encoding.
pub const SESSION_ID_BYTES: usize = 32;
