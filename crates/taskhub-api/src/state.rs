use std::sync::Arc;

use axum::http::header::{HeaderName, InvalidHeaderName};

use taskhub_core::repositories::{TaskRepository, UserRepository};
use taskhub_core::services::{AuthService, TaskService};
use taskhub_security::SessionAuthority;
use taskhub_shared::config::SessionSettings;

/// How the session gate reads the credential off a request.
#[derive(Debug, Clone)]
pub struct GateSettings {
    pub header: HeaderName,
    pub accept_bearer_prefix: bool,
}

impl GateSettings {
    pub fn from_settings(settings: &SessionSettings) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(settings.header.as_bytes())?,
            accept_bearer_prefix: settings.accept_bearer_prefix,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService<dyn UserRepository>>,
    pub tasks: Arc<TaskService<dyn TaskRepository>>,
    pub gate: Arc<GateSettings>,
}

impl AppState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        task_repo: Arc<dyn TaskRepository>,
        sessions: Arc<SessionAuthority>,
        gate: GateSettings,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(user_repo, sessions)),
            tasks: Arc::new(TaskService::new(task_repo)),
            gate: Arc::new(gate),
        }
    }
}
