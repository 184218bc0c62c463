//! User domain entity

use chrono::{DateTime, Utc};
use validator::Validate;

use taskhub_shared::EntityId;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub email: String,
    /// Password hash (Argon2 PHC string, or a legacy bcrypt hash).
    pub password: String,

    // Audit fields
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub removed_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_deleted(&self) -> bool {
        self.removed_at.is_some()
    }
}

/// A user about to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewUser {
    #[validate(length(min = 3, max = 50, message = "username must be 3 to 50 characters"))]
    pub username: String,

    #[validate(email(message = "email must be a valid address"))]
    pub email: String,

    pub password_hash: String,
}

impl NewUser {
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
    ) -> Result<Self, validator::ValidationErrors> {
        let user = Self { username, email, password_hash };
        user.validate()?;
        Ok(user)
    }
}
