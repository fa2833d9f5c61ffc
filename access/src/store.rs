//! Session persistence over a string key/value medium.
//!
//! DESIGN
//! ======
//! `SessionStore` is a passive adapter: it never decides *whether* a session
//! is valid, only how it is laid out on disk/in `localStorage`. Reads and
//! writes are best-effort. A missing or corrupted entry reads as "no
//! session" and a failed write is logged and dropped, so persistence
//! problems never block rendering.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use crate::error::StorageError;
use crate::session::{Session, User};

/// Storage key for the opaque bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-serialized [`User`].
pub const USER_KEY: &str = "user";
/// Storage key for the client-scoped identifier (client sessions only).
pub const CLIENT_ID_KEY: &str = "clientId";

/// Minimal string key/value medium (browser `localStorage`, a JSON file, memory).
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] when the medium refuses the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove(&self, key: &str);
}

/// In-process storage, used by tests and as a fallback when no durable
/// medium is available.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Reads and writes the persisted session layout on top of a [`Storage`].
#[derive(Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: Storage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Stored bearer token, if any. Blank tokens count as absent.
    pub fn read_token(&self) -> Option<String> {
        self.storage
            .get(TOKEN_KEY)
            .filter(|token| !token.trim().is_empty())
    }

    /// Full stored session. Partial or unparseable entries yield `None`.
    pub fn read(&self) -> Option<Session> {
        let token = self.read_token()?;
        let raw_user = self.storage.get(USER_KEY)?;
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!(error = %e, "stored user record is unreadable; treating as no session");
                None
            }
        }
    }

    /// Persist `session`, replacing whatever was stored before.
    pub fn write(&self, session: &Session) {
        let raw_user = match serde_json::to_string(&session.user) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize user; session not persisted");
                return;
            }
        };

        // Token goes last and only over a fresh user, so a failed write reads
        // back as no session rather than a new token beside an old user.
        self.storage.remove(TOKEN_KEY);
        if !self.set_or_warn(USER_KEY, &raw_user) {
            self.storage.remove(CLIENT_ID_KEY);
            return;
        }
        self.set_or_warn(TOKEN_KEY, &session.token);
        match session.client_scope_id() {
            Some(client_id) => {
                self.set_or_warn(CLIENT_ID_KEY, client_id);
            }
            None => self.storage.remove(CLIENT_ID_KEY),
        }
    }

    /// Remove every session key, including the client-scoped one.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
        self.storage.remove(CLIENT_ID_KEY);
    }

    fn set_or_warn(&self, key: &str, value: &str) -> bool {
        match self.storage.set(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "session storage write failed");
                false
            }
        }
    }
}
