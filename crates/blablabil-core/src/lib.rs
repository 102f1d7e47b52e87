//! Core domain types for the blablabil ride-sharing client: user and
//! session models, the credential storage trait, and the shared error
//! type. Infrastructure and API concerns live in the sibling crates.

pub mod error;
pub mod notification;
pub mod session;
pub mod user;

pub use error::{BlablabilError, Result};
pub use notification::{Notification, NotificationId, Severity};
pub use session::{AuthOutcome, CredentialStore, SessionSnapshot, SessionState};
pub use user::{RidePreferences, User, UserUpdate};
