// ============================================================================
// TaskHub API - Auth Handlers
// File: crates/taskhub-api/src/handlers/auth.rs
// ============================================================================
//! Authentication HTTP handlers (register, login, logout, me)

use axum::{extract::State, http::StatusCode, Json};

use taskhub_core::services::{AuthResult, UserInfo};

use crate::dto::{LoginRequest, RegisterRequest};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::middleware::CurrentUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Register handler - POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResult>), ApiError> {
    let result = state
        .auth
        .register(&payload.username, &payload.email, &payload.password)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> Result<Json<AuthResult>, ApiError> {
    let result = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(result))
}

/// Logout handler - POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, current: CurrentUser) -> Json<MessageResponse> {
    state.auth.logout(&current.session_id);
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/me
pub async fn me(current: CurrentUser) -> Json<UserInfo> {
    Json(UserInfo::from(&current.user))
}
