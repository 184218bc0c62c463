// ============================================================================
// TaskHub Security - Session Authority
// File: crates/taskhub-security/src/session.rs
// ============================================================================
//! Opaque session identifiers bound to a user id and an absolute expiry.
//!
//! The authority owns its table; nothing here is global. Live lookups share
//! the read lock, while issuing, lazy eviction, logout and sweeping take the
//! write lock for a single map mutation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, error};

use taskhub_shared::constants::SESSION_ID_BYTES;
use taskhub_shared::EntityId;

use crate::clock::{Clock, SystemClock};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("empty session credential")]
    EmptyCredential,
    #[error("session not found")]
    NotFound,
    #[error("session expired")]
    Expired,
    #[error("random source unavailable: {0}")]
    RandomSource(String),
}

impl SessionError {
    /// Kinds that a caller only ever sees as "invalid session".
    pub fn is_invalid_session(&self) -> bool {
        matches!(
            self,
            SessionError::EmptyCredential | SessionError::NotFound | SessionError::Expired
        )
    }
}

#[derive(Debug, Clone, Copy)]
struct SessionRecord {
    user_id: EntityId,
    expires_at: DateTime<Utc>,
}

pub struct SessionAuthority {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SessionAuthority {
    pub fn new(ttl: std::time::Duration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    pub fn with_clock(ttl: std::time::Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::from_std(ttl).unwrap_or(Duration::MAX),
            clock,
        }
    }

    /// Creates a session for `user_id` and returns its identifier.
    pub fn issue(&self, user_id: EntityId) -> Result<String, SessionError> {
        loop {
            let session_id = generate_session_id()?;
            let expires_at = self
                .clock
                .now()
                .checked_add_signed(self.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC);

            let mut sessions = self.sessions.write();
            if let Entry::Vacant(slot) = sessions.entry(session_id.clone()) {
                slot.insert(SessionRecord { user_id, expires_at });
                drop(sessions);
                debug!(
                    user_id,
                    session = %fingerprint(&session_id),
                    %expires_at,
                    "session issued"
                );
                return Ok(session_id);
            }
        }
    }

    /// Resolves a session to its user id. Never extends the expiry.
    ///
    /// An expired entry is removed before `Expired` is returned, so the next
    /// lookup of the same id reports `NotFound`.
    pub fn validate(&self, session_id: &str) -> Result<EntityId, SessionError> {
        if session_id.is_empty() {
            return Err(SessionError::EmptyCredential);
        }

        let now = self.clock.now();
        let record = self
            .sessions
            .read()
            .get(session_id)
            .copied()
            .ok_or(SessionError::NotFound)?;

        if now < record.expires_at {
            return Ok(record.user_id);
        }

        if self.evict_expired(session_id, now) {
            debug!(session = %fingerprint(session_id), "expired session evicted");
        }

        Err(SessionError::Expired)
    }

    /// Removes the entry if it is still stored and expired at `now`.
    /// Returns false when a concurrent sweep or validation got there first.
    fn evict_expired(&self, session_id: &str, now: DateTime<Utc>) -> bool {
        let mut sessions = self.sessions.write();
        let expired = sessions
            .get(session_id)
            .is_some_and(|current| current.expires_at <= now);
        expired && sessions.remove(session_id).is_some()
    }

    /// Removes one session. Returns whether it existed.
    pub fn invalidate(&self, session_id: &str) -> bool {
        self.sessions.write().remove(session_id).is_some()
    }

    /// Removes every session with `expires_at <= now`, returning the count.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, record| record.expires_at > now);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

/// 256 bits from the OS CSPRNG, URL-safe base64 without padding.
fn generate_session_id() -> Result<String, SessionError> {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
        error!("OS random source failed: {}", e);
        SessionError::RandomSource(e.to_string())
    })?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Short, non-reversible tag for a session id, safe to put in logs.
pub fn fingerprint(session_id: &str) -> String {
    let digest = Sha256::digest(session_id.as_bytes());
    hex::encode(&digest[..6])
}
