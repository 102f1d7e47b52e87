//! Unified path management for blablabil client files.
//!
//! All configuration and credential data lives under the platform config
//! directory so the layout is consistent across Linux, macOS and Windows.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for blablabil.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/blablabil/         # Config directory
/// ├── config.toml              # API endpoint configuration
/// ├── auth_token               # Bearer token (plain text, 600)
/// └── user.json                # Cached user record
/// ```
pub struct BlablabilPaths;

impl BlablabilPaths {
    /// Returns the blablabil configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/blablabil/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("blablabil"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the stored bearer token.
    ///
    /// # Security Note
    ///
    /// The token file is written with 600 permissions on Unix so other
    /// users on the machine cannot read the credential.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("auth_token"))
    }

    /// Returns the path to the cached user record.
    pub fn user_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("user.json"))
    }
}
