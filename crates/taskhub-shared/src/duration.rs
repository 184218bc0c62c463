//! Human duration strings (`24h`, `90m`, `1h30m`, `1h 30m`, `1500ms`).
//!
//! A plain integer is read as hours, so `SESSION__TTL=12` means twelve
//! hours. Everything else goes through `humantime`.

use std::borrow::Cow;
use std::time::Duration;

use crate::error::AppError;

pub fn parse_duration(input: &str) -> Result<Duration, AppError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "empty value"));
    }

    let normalized: Cow<'_, str> = if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        Cow::Owned(format!("{}h", trimmed))
    } else {
        Cow::Borrowed(trimmed)
    };

    humantime::parse_duration(&normalized).map_err(|e| invalid(input, &e.to_string()))
}

fn invalid(value: &str, reason: &str) -> AppError {
    AppError::InvalidDuration {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
