//! User repository trait (port)

use async_trait::async_trait;

use taskhub_shared::EntityId;

use crate::domain::{NewUser, User};
use crate::error::DomainError;

/// Soft-deleted users are invisible to every lookup.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Inserts a user. A taken username or email yields
    /// `UsernameAlreadyExists` / `EmailAlreadyExists`.
    async fn create(&self, user: &NewUser) -> Result<User, DomainError>;

    /// Marks the user removed. Returns `false` if no live user had this id.
    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError>;
}
