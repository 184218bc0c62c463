use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use taskhub_core::domain::{NewUser, User};
use taskhub_core::error::DomainError;
use taskhub_core::repositories::UserRepository;
use taskhub_shared::EntityId;

#[derive(Default)]
struct UserTable {
    last_id: EntityId,
    rows: Vec<User>,
}

impl UserTable {
    fn live(&self) -> impl Iterator<Item = &User> {
        self.rows.iter().filter(|u| !u.is_deleted())
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().live().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().live().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().live().find(|u| u.username == username).cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write();
        if table.live().any(|u| u.username == user.username) {
            return Err(DomainError::UsernameAlreadyExists(user.username.clone()));
        }
        if table.live().any(|u| u.email == user.email) {
            return Err(DomainError::EmailAlreadyExists(user.email.clone()));
        }

        table.last_id += 1;
        let now = Utc::now();
        let created = User {
            id: table.last_id,
            username: user.username.clone(),
            email: user.email.clone(),
            password: user.password_hash.clone(),
            created_at: now,
            updated_at: now,
            removed_at: None,
        };
        table.rows.push(created.clone());
        Ok(created)
    }

    async fn soft_delete(&self, id: EntityId) -> Result<bool, DomainError> {
        let mut table = self.table.write();
        match table.rows.iter_mut().find(|u| u.id == id && !u.is_deleted()) {
            Some(user) => {
                let now = Utc::now();
                user.removed_at = Some(now);
                user.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
