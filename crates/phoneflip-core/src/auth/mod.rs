//! Session state and token persistence.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::models::User;
use crate::util::normalize_text_option;
use crate::{Error, Result};

/// Bearer token issued by the backend.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token; blank input yields `None`.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        normalize_text_option(Some(raw.into())).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("AccessToken([REDACTED])")
    }
}

/// Durable storage for the bearer token.
pub trait TokenPersistence: Clone + Send + Sync + 'static {
    fn load_token(&self) -> Result<Option<AccessToken>>;
    fn save_token(&self, token: &AccessToken) -> Result<()>;
    fn clear_token(&self) -> Result<()>;
}

/// Process-local token store.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<AccessToken>>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: AccessToken) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token))),
        }
    }
}

impl TokenPersistence for MemoryTokenStore {
    fn load_token(&self) -> Result<Option<AccessToken>> {
        let guard = self
            .token
            .lock()
            .map_err(|_| Error::Storage("token store lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn save_token(&self, token: &AccessToken) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::Storage("token store lock poisoned".to_string()))?;
        *guard = Some(token.clone());
        Ok(())
    }

    fn clear_token(&self) -> Result<()> {
        let mut guard = self
            .token
            .lock()
            .map_err(|_| Error::Storage("token store lock poisoned".to_string()))?;
        *guard = None;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Authenticating,
    Authenticated,
}

/// Current session: the token and the user it belongs to.
///
/// Token and user are set and cleared together; `phase` is `Authenticated`
/// exactly when both are present.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Option<AccessToken>,
    user: Option<User>,
    phase: AuthPhase,
}

impl Session {
    pub const fn phase(&self) -> AuthPhase {
        self.phase
    }

    pub const fn is_authenticated(&self) -> bool {
        matches!(self.phase, AuthPhase::Authenticated)
    }

    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub const fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// Token to attach as `Authorization: Bearer`, when signed in.
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_ref().map(AccessToken::as_str)
    }

    /// Mark a credential exchange as in flight. A signed-in session is left
    /// untouched.
    pub fn begin_authenticating(&mut self) {
        if !self.is_authenticated() {
            self.phase = AuthPhase::Authenticating;
        }
    }

    /// Abandon an in-flight credential exchange.
    pub fn fail_authenticating(&mut self) {
        if self.phase == AuthPhase::Authenticating {
            self.phase = AuthPhase::Anonymous;
        }
    }

    pub fn establish(&mut self, token: AccessToken, user: User) {
        self.token = Some(token);
        self.user = Some(user);
        self.phase = AuthPhase::Authenticated;
    }

    /// Replace the cached user of a signed-in session.
    pub fn refresh_user(&mut self, user: User) {
        if self.is_authenticated() {
            self.user = Some(user);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
