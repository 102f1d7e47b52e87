//! Filesystem-backed credential storage.
//!
//! Persists the bearer token and cached user record as two files under
//! ~/.config/blablabil/ so a signed-in session survives restarts.

use std::path::PathBuf;

use async_trait::async_trait;
use blablabil_core::error::Result;
use blablabil_core::session::CredentialStore;
use tokio::fs;

use crate::paths::{BlablabilPaths, PathError};

const TOKEN_FILE: &str = "auth_token";
const USER_FILE: &str = "user.json";

/// Stores credentials as plain files.
///
/// Responsibilities:
/// - Read the token and user record, treating unreadable entries as absent
/// - Write both entries on sign-in, with 600 permissions on the token
/// - Remove both entries on sign-out, tolerating already-missing files
///
/// Does NOT:
/// - Validate the token or the user JSON (callers decide what is usable)
/// - Encrypt anything (plain text storage, protected by file permissions)
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store rooted at the default config directory.
    pub fn new() -> std::result::Result<Self, PathError> {
        Ok(Self {
            dir: BlablabilPaths::config_dir()?,
        })
    }

    /// Creates a store rooted at a custom directory (for testing).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    pub fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    async fn read_entry(&self, path: PathBuf) -> Option<String> {
        match fs::read_to_string(&path).await {
            Ok(content) => {
                let content = content.trim();
                if content.is_empty() {
                    None
                } else {
                    Some(content.to_string())
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(
                    "[CredentialStore] Failed to read {}: {}",
                    path.display(),
                    err
                );
                None
            }
        }
    }

    async fn remove_entry(&self, path: PathBuf) -> Result<()> {
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load_token(&self) -> Option<String> {
        self.read_entry(self.token_path()).await
    }

    async fn load_user(&self) -> Option<String> {
        self.read_entry(self.user_path()).await
    }

    async fn save(&self, token: &str, user_json: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let token_path = self.token_path();
        fs::write(&token_path, token).await?;

        // Token is the credential; keep it out of reach of other users.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            fs::set_permissions(&token_path, permissions).await?;
        }

        fs::write(self.user_path(), user_json).await?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.remove_entry(self.token_path()).await?;
        self.remove_entry(self.user_path()).await?;
        Ok(())
    }
}
