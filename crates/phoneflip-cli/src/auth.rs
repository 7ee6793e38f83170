//! Keychain persistence for the PhoneFlip access token.

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;

use phoneflip_core::auth::{AccessToken, TokenPersistence};
use phoneflip_core::{Error, Result};

#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "phoneflip-cli";

/// One keychain entry per CLI profile.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    username: String,
}

impl KeyringTokenStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            username: format!("access_token:{profile_name}"),
        }
    }

    #[cfg(test)]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[cfg(test)]
    fn test_store() -> &'static Mutex<HashMap<String, String>> {
        static STORE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        STORE.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.username)
            .map_err(|error| Error::Storage(error.to_string()))
    }
}

impl TokenPersistence for KeyringTokenStore {
    #[cfg(not(test))]
    fn load_token(&self) -> Result<Option<AccessToken>> {
        let entry = self.entry()?;
        match entry.get_password() {
            Ok(raw) => Ok(AccessToken::new(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<Option<AccessToken>> {
        let guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.get(&self.username).cloned().and_then(AccessToken::new))
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &AccessToken) -> Result<()> {
        self.entry()?
            .set_password(token.as_str())
            .map_err(|error| Error::Storage(error.to_string()))
    }

    #[cfg(test)]
    fn save_token(&self, token: &AccessToken) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.insert(self.username.clone(), token.as_str().to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<()> {
        let entry = self.entry()?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::Storage(error.to_string())),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<()> {
        let mut guard = Self::test_store()
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.remove(&self.username);
        Ok(())
    }
}

pub fn load_stored_token(profile_name: &str) -> Result<Option<AccessToken>> {
    KeyringTokenStore::new(profile_name).load_token()
}

pub fn clear_stored_token(profile_name: &str) -> Result<()> {
    KeyringTokenStore::new(profile_name).clear_token()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_scoped_per_profile() {
        let work = KeyringTokenStore::new("auth-test-work");
        let home = KeyringTokenStore::new("auth-test-home");
        work.save_token(&AccessToken::new("work-token").unwrap())
            .unwrap();

        assert_eq!(
            load_stored_token("auth-test-work")
                .unwrap()
                .map(|token| token.as_str().to_string()),
            Some("work-token".to_string())
        );
        assert!(home.load_token().unwrap().is_none());
        assert_eq!(work.username(), "access_token:auth-test-work");
    }

    #[test]
    fn clear_is_idempotent() {
        let store = KeyringTokenStore::new("auth-test-clear");
        store
            .save_token(&AccessToken::new("secret").unwrap())
            .unwrap();
        clear_stored_token("auth-test-clear").unwrap();
        clear_stored_token("auth-test-clear").unwrap();
        assert!(store.load_token().unwrap().is_none());
    }

    #[test]
    fn debug_does_not_leak_token() {
        let token = AccessToken::new("secret-access-token").unwrap();
        let rendered = format!("{token:?}");
        assert!(!rendered.contains("secret-access-token"));
    }
}
