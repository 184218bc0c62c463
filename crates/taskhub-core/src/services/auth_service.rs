// ============================================================================
// TaskHub Core - Authentication Service
// File: crates/taskhub-core/src/services/auth_service.rs
// ============================================================================
//! Registration, login, logout and session resolution

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use taskhub_security::{session, PasswordService, SessionAuthority};
use taskhub_shared::utils::mask_email;
use taskhub_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;
use crate::repositories::UserRepository;

/// Authentication service for handling user login/register flows
pub struct AuthService<R: UserRepository + ?Sized> {
    user_repo: Arc<R>,
    sessions: Arc<SessionAuthority>,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    pub fn new(user_repo: Arc<R>, sessions: Arc<SessionAuthority>) -> Self {
        Self { user_repo, sessions }
    }

    /// Register a new user and open a session for them
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResult, DomainError> {
        info!("Registration attempt for email: {}", mask_email(email));

        // 1. Uniqueness checks (the store enforces them again on insert)
        if self.user_repo.find_by_username(username).await?.is_some() {
            warn!("Registration failed: username already exists: {}", username);
            return Err(DomainError::UsernameAlreadyExists(username.to_string()));
        }
        if self.user_repo.find_by_email(email).await?.is_some() {
            warn!("Registration failed: email already exists: {}", mask_email(email));
            return Err(DomainError::EmailAlreadyExists(email.to_string()));
        }

        // 2. Hash password
        let password_hash = PasswordService::hash(password)
            .map_err(|e| DomainError::PasswordHashError(e.to_string()))?;

        // 3. Validate and save
        let new_user = NewUser::new(username.to_string(), email.to_string(), password_hash)?;
        let user = self.user_repo.create(&new_user).await?;

        // 4. Session
        let token = self.open_session(&user)?;

        info!(user_id = user.id, "Registration successful");
        Ok(AuthResult { token, user: UserInfo::from(&user) })
    }

    /// Login with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResult, DomainError> {
        info!("Login attempt for email: {}", mask_email(email));

        let user = self.user_repo.find_by_email(email).await?.ok_or_else(|| {
            warn!("Login failed: email not found: {}", mask_email(email));
            DomainError::InvalidCredentials
        })?;

        match PasswordService::verify(password, &user.password) {
            Ok(true) => {}
            Ok(false) => {
                warn!(user_id = user.id, "Login failed: invalid password");
                return Err(DomainError::InvalidCredentials);
            }
            Err(e) => {
                error!(user_id = user.id, "Stored password hash is unusable: {}", e);
                return Err(DomainError::InvalidCredentials);
            }
        }

        let token = self.open_session(&user)?;

        info!(user_id = user.id, "Login successful");
        Ok(AuthResult { token, user: UserInfo::from(&user) })
    }

    /// Ends one session. Other sessions of the same user stay valid.
    pub fn logout(&self, session_id: &str) -> bool {
        let removed = self.sessions.invalidate(session_id);
        info!(session = %session::fingerprint(session_id), removed, "Logout");
        removed
    }

    /// Resolves a presented session id to its live user.
    pub async fn authenticate(&self, session_id: &str) -> Result<User, DomainError> {
        let user_id = self.sessions.validate(session_id).map_err(|e| {
            warn!(session = %session::fingerprint(session_id), reason = %e, "Session rejected");
            DomainError::Session(e)
        })?;

        self.user_repo.find_by_id(user_id).await?.ok_or_else(|| {
            warn!(user_id, "Session refers to a missing user");
            DomainError::UserNotFound
        })
    }

    fn open_session(&self, user: &User) -> Result<String, DomainError> {
        self.sessions.issue(user.id).map_err(|e| {
            error!(user_id = user.id, "Failed to issue session: {}", e);
            DomainError::Session(e)
        })
    }
}

/// Result of a successful register or login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResult {
    pub token: String,
    pub user: UserInfo,
}

/// User info returned in auth responses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockUserRepository;
    use taskhub_security::{ManualClock, SessionError};

    fn stored_user(id: EntityId, username: &str, email: &str, password: &str) -> User {
        let now = Utc::now();
        User {
            id,
            username: username.to_string(),
            email: email.to_string(),
            password: PasswordService::hash(password).unwrap(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        }
    }

    fn authority() -> Arc<SessionAuthority> {
        Arc::new(SessionAuthority::new(std::time::Duration::from_secs(3600)))
    }

    #[tokio::test]
    async fn register_creates_user_and_session() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|u: &NewUser| u.username == "alice" && u.password_hash.starts_with("$argon2"))
            .times(1)
            .returning(|u: &NewUser| {
                let now = Utc::now();
                Ok(User {
                    id: 1,
                    username: u.username.clone(),
                    email: u.email.clone(),
                    password: u.password_hash.clone(),
                    created_at: now,
                    updated_at: now,
                    removed_at: None,
                })
            });

        let sessions = authority();
        let service = AuthService::new(Arc::new(repo), sessions.clone());
        let result = service.register("alice", "alice@example.com", "secret1").await.unwrap();

        assert_eq!(result.user.username, "alice");
        assert_eq!(sessions.validate(&result.token), Ok(1));
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|name| Ok(Some(stored_user(1, name, "a@example.com", "secret1"))));
        repo.expect_create().never();

        let service = AuthService::new(Arc::new(repo), authority());
        let err = service.register("alice", "other@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::UsernameAlreadyExists(name) if name == "alice"));
    }

    #[tokio::test]
    async fn register_rejects_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(1, "bob", email, "secret1"))));

        let service = AuthService::new(Arc::new(repo), authority());
        let err = service.register("alice", "bob@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::EmailAlreadyExists(_)));
    }

    #[tokio::test]
    async fn register_rejects_invalid_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().never();

        let service = AuthService::new(Arc::new(repo), authority());
        let err = service.register("alice", "nope", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[tokio::test]
    async fn login_checks_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .withf(|email: &str| email == "alice@example.com")
            .returning(|email| Ok(Some(stored_user(3, "alice", email, "secret1"))));

        let sessions = authority();
        let service = AuthService::new(Arc::new(repo), sessions.clone());

        let ok = service.login("alice@example.com", "secret1").await.unwrap();
        assert_eq!(sessions.validate(&ok.token), Ok(3));

        let err = service.login("alice@example.com", "wrong").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[tokio::test]
    async fn login_unknown_email_is_invalid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repo), authority());
        let err = service.login("ghost@example.com", "secret1").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn authenticate_resolves_live_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "alice", "alice@example.com", "secret1"))));

        let sessions = authority();
        let token = sessions.issue(9).unwrap();
        let service = AuthService::new(Arc::new(repo), sessions);

        assert_eq!(service.authenticate(&token).await.unwrap().id, 9);
        let err = service.authenticate("bogus").await.unwrap_err();
        assert!(matches!(err, DomainError::Session(SessionError::NotFound)));
    }

    #[tokio::test]
    async fn authenticate_rejects_expired_session() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let clock = Arc::new(ManualClock::default());
        let sessions = Arc::new(SessionAuthority::with_clock(
            std::time::Duration::from_secs(60),
            clock.clone(),
        ));
        let token = sessions.issue(1).unwrap();
        clock.advance(chrono::Duration::seconds(61));

        let service = AuthService::new(Arc::new(repo), sessions);
        let err = service.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::Session(SessionError::Expired)));
    }

    #[tokio::test]
    async fn authenticate_rejects_deleted_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let sessions = authority();
        let token = sessions.issue(4).unwrap();
        let service = AuthService::new(Arc::new(repo), sessions);

        let err = service.authenticate(&token).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound));
    }

    #[tokio::test]
    async fn logout_invalidates_only_that_session() {
        let repo = MockUserRepository::new();
        let sessions = authority();
        let first = sessions.issue(1).unwrap();
        let second = sessions.issue(1).unwrap();
        let service = AuthService::new(Arc::new(repo), sessions.clone());

        assert!(service.logout(&first));
        assert!(!service.logout(&first));
        assert_eq!(sessions.validate(&second), Ok(1));
    }
}
