//! OS keychain storage for the access token.
//!
//! Uses the `keyring` crate (macOS Keychain, Windows Credential Manager,
//! Secret Service on Linux). The token is stored under a fixed key so it can
//! be found again on the next launch.

use keyring::Entry;

use super::{StorageError, TokenStore};

/// Default keychain service name.
pub const DEFAULT_SERVICE_NAME: &str = "com.kidscare.app";

/// Fixed keychain username under which the access token is stored.
pub const TOKEN_KEY: &str = "accessToken";

impl From<keyring::Error> for StorageError {
    fn from(err: keyring::Error) -> Self {
        StorageError::Backend(err.to_string())
    }
}

/// Token store backed by a single keychain entry.
pub struct KeychainTokenStore {
    entry: Entry,
}

impl KeychainTokenStore {
    /// Open the token entry for the given keychain service.
    pub fn new(service: &str) -> Result<Self, StorageError> {
        let entry = Entry::new(service, TOKEN_KEY)?;
        Ok(Self { entry })
    }
}

impl TokenStore for KeychainTokenStore {
    fn save(&self, token: &str) -> Result<(), StorageError> {
        self.entry.set_password(token)?;
        Ok(())
    }

    /// Returns `None` if no entry exists (first run or logged out).
    fn load(&self) -> Result<Option<String>, StorageError> {
        match self.entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::from(e)),
        }
    }

    /// Idempotent: ignores `NoEntry` (already deleted or never stored).
    fn clear(&self) -> Result<(), StorageError> {
        match self.entry.delete_credential() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::from(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_store() -> KeychainTokenStore {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        KeychainTokenStore::new(DEFAULT_SERVICE_NAME).unwrap()
    }

    #[test]
    fn test_keychain_load_absent() {
        let store = mock_store();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_keychain_round_trip() {
        let store = mock_store();
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_keychain_clear_twice() {
        let store = mock_store();
        store.save("abc123").unwrap();
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }
}
