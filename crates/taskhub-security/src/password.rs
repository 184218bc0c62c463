//! Password hashing with Argon2
//!
//! New hashes are Argon2 PHC strings. Legacy bcrypt hashes (`$2a$`, `$2b$`,
//! `$2y$`) are still accepted by [`PasswordService::verify`].

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Unsupported hash format: {0}")]
    UnsupportedHash(String),
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        if is_bcrypt_hash(hash) {
            return bcrypt::verify(password, hash)
                .map_err(|e| PasswordError::HashError(e.to_string()));
        }

        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::UnsupportedHash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

fn is_bcrypt_hash(hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"].iter().any(|prefix| hash.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argon2_hash_verifies() {
        let hash = PasswordService::hash("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(PasswordService::verify("correct horse", &hash).unwrap());
        assert!(!PasswordService::verify("wrong horse", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = PasswordService::hash("secret1").unwrap();
        let b = PasswordService::hash("secret1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn legacy_bcrypt_hash_verifies() {
        let legacy = bcrypt::hash("secret1", 4).unwrap();
        assert!(PasswordService::verify("secret1", &legacy).unwrap());
        assert!(!PasswordService::verify("secret2", &legacy).unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(
            PasswordService::verify("secret1", "plaintext"),
            Err(PasswordError::UnsupportedHash(_))
        ));
    }
}
