//! Application layer for blablabil.
//!
//! This crate owns the stateful services between the HTTP layer and a
//! shell: session lifecycle, the toast notification queue, route guards,
//! and the bootstrap that wires everything together.

pub mod bootstrap;
pub mod guards;
pub mod notification_center;
pub mod session_service;

pub use bootstrap::{AppHandle, SESSION_EXPIRED_MESSAGE, bootstrap, bootstrap_with};
pub use guards::{GuardDecision, RouteGuard};
pub use notification_center::{DEFAULT_DURATION, NotificationCenter};
pub use session_service::{AuthGateway, SessionService};
