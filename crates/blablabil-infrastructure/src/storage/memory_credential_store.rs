use std::sync::Mutex;

use async_trait::async_trait;
use blablabil_core::error::Result;
use blablabil_core::session::CredentialStore;

/// In-memory credential store for tests and ephemeral sessions. The two
/// entries are held independently so tests can set up half-written
/// states.
#[derive(Default)]
pub struct MemoryCredentialStore {
    token: Mutex<Option<String>>,
    user: Mutex<Option<String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a signed-in pair.
    pub fn with_credentials(token: impl Into<String>, user_json: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
            user: Mutex::new(Some(user_json.into())),
        }
    }

    /// Creates a store holding only a token, as left behind by an
    /// interrupted save.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
            user: Mutex::new(None),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load_token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn load_user(&self) -> Option<String> {
        self.user.lock().unwrap().clone()
    }

    async fn save(&self, token: &str, user_json: &str) -> Result<()> {
        *self.token.lock().unwrap() = Some(token.to_string());
        *self.user.lock().unwrap() = Some(user_json.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.token.lock().unwrap() = None;
        *self.user.lock().unwrap() = None;
        Ok(())
    }
}
