use async_trait::async_trait;

use crate::error::Result;

/// Durable storage for the two credential entries: the bearer token and
/// the cached user record (serialized JSON).
///
/// Only the session service and the HTTP adapter's unauthorized handler
/// write through this trait. Reads that fail are reported as if the
/// entry were absent, so a damaged store degrades to "signed out"
/// rather than an error at startup.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the stored bearer token, or `None` if absent or unreadable.
    async fn load_token(&self) -> Option<String>;

    /// Returns the stored user record as raw JSON, or `None` if absent
    /// or unreadable.
    async fn load_user(&self) -> Option<String>;

    /// Persists both entries together.
    async fn save(&self, token: &str, user_json: &str) -> Result<()>;

    /// Removes both entries. Absent entries are not an error.
    async fn clear(&self) -> Result<()>;
}
