// ============================================================================
// TaskHub API - Session Gate
// File: crates/taskhub-api/src/middleware/auth.rs
// ============================================================================
//! Resolves the session credential on protected routes and attaches the
//! authenticated user to the request.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use taskhub_core::{DomainError, User};
use taskhub_shared::constants::BEARER_PREFIX;
use taskhub_shared::EntityId;

use crate::error::{ApiError, INVALID_SESSION, MISSING_CREDENTIAL};
use crate::state::{AppState, GateSettings};

/// Identity attached by [`require_session`]; request-scoped.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: EntityId,
    pub user: User,
    /// The credential that authenticated this request.
    pub session_id: String,
}

/// Pulls the credential out of the configured header.
fn credential<'a>(value: &'a str, gate: &GateSettings) -> &'a str {
    let value = value.trim();
    if gate.accept_bearer_prefix {
        if let Some(stripped) = value.strip_prefix(BEARER_PREFIX) {
            return stripped.trim_start();
        }
    }
    value
}

pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let raw = request
        .headers()
        .get(&state.gate.header)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized(MISSING_CREDENTIAL.to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized(INVALID_SESSION.to_string()))?;
    let session_id = credential(raw, &state.gate).to_string();

    let user = state.auth.authenticate(&session_id).await.map_err(|e| match e {
        DomainError::UserNotFound => ApiError::Unauthorized("user not found".to_string()),
        other => ApiError::from(other),
    })?;

    debug!(user_id = user.id, "Request authenticated");
    request.extensions_mut().insert(CurrentUser {
        user_id: user.id,
        user,
        session_id,
    });

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::InternalError("session gate missing on route".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderName;

    fn gate(accept_bearer_prefix: bool) -> GateSettings {
        GateSettings {
            header: HeaderName::from_static("authorization"),
            accept_bearer_prefix,
        }
    }

    #[test]
    fn raw_credential_is_trimmed() {
        assert_eq!(credential("  abc  ", &gate(false)), "abc");
    }

    #[test]
    fn bearer_prefix_only_stripped_when_enabled() {
        assert_eq!(credential("Bearer abc", &gate(false)), "Bearer abc");
        assert_eq!(credential("Bearer abc", &gate(true)), "abc");
        assert_eq!(credential("abc", &gate(true)), "abc");
    }
}
