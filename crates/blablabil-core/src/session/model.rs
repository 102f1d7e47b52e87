//! Session state owned by the session service.
//!
//! The state starts in `loading` until the stored credentials have been
//! restored, so route guards can hold rendering instead of bouncing a
//! still-authenticated user to the login page.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Mutable session state. Held behind a lock by the session service;
/// consumers observe it through [`SessionSnapshot`].
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Authenticated account, if any.
    pub user: Option<User>,
    /// Bearer token paired with `user`. Never exposed in snapshots.
    pub token: Option<String>,
    /// True until the initial restore from disk has finished.
    pub loading: bool,
    /// Last authentication failure, cleared on the next attempt.
    pub error: Option<String>,
}

impl SessionState {
    /// State at process start: nobody signed in, restore pending.
    pub fn initial() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
            error: None,
        }
    }

    /// Installs an authenticated pair and clears any previous error.
    pub fn sign_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
        self.error = None;
    }

    /// Drops the authenticated pair and any recorded error.
    pub fn sign_out(&mut self) {
        self.token = None;
        self.user = None;
        self.error = None;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            user: self.user.clone(),
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

/// Read-only view of the session handed to guards and UI code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|user| user.is_admin)
    }
}

/// Result of a login or registration attempt. Failures carry a message
/// fit for direct display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure { message } => Some(message),
        }
    }
}
