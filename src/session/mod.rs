//! Session token storage.
//!
//! The access token returned by `POST /auth/login` is the only on-device
//! persisted state. It lives behind the [`TokenStore`] trait so the API client
//! can be handed the OS keychain in production and an in-memory fake in tests.

pub mod claims;
pub mod keychain;

use std::sync::RwLock;

use thiserror::Error;

pub use claims::{Role, SessionClaims};
pub use keychain::KeychainTokenStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Token storage failed: {0}")]
    Backend(String),
    #[error("Token storage lock poisoned")]
    Poisoned,
}

/// Durable holder of the current bearer token.
///
/// `load` reports absence as `Ok(None)`; only an actual storage fault is an
/// error. `clear` succeeds on an already-empty store.
pub trait TokenStore: Send + Sync {
    fn save(&self, token: &str) -> Result<(), StorageError>;

    fn load(&self) -> Result<Option<String>, StorageError>;

    fn clear(&self) -> Result<(), StorageError>;
}

/// Process-local token store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `token`.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: RwLock::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &str) -> Result<(), StorageError> {
        let mut guard = self.token.write().map_err(|_| StorageError::Poisoned)?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        let guard = self.token.read().map_err(|_| StorageError::Poisoned)?;
        Ok(guard.clone())
    }

    fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.token.write().map_err(|_| StorageError::Poisoned)?;
        *guard = None;
        Ok(())
    }
}

/// Store whose backend is always unavailable.
#[cfg(test)]
pub(crate) struct FailingTokenStore;

#[cfg(test)]
impl TokenStore for FailingTokenStore {
    fn save(&self, _token: &str) -> Result<(), StorageError> {
        Err(StorageError::Backend("keychain locked".to_string()))
    }

    fn load(&self) -> Result<Option<String>, StorageError> {
        Err(StorageError::Backend("keychain locked".to_string()))
    }

    fn clear(&self) -> Result<(), StorageError> {
        Err(StorageError::Backend("keychain locked".to_string()))
    }
}
