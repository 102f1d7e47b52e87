//! Typed bindings for the blablabil REST backend.
//!
//! All calls go through a shared [`ApiClient`] that injects the stored
//! bearer token and enforces the 401 purge policy; resource groups
//! ([`AuthApi`], [`TripsApi`], ...) add the endpoint shapes on top.

pub mod admin;
pub mod auth;
pub mod bookings;
pub mod config;
pub mod error;
pub mod http;
pub mod notifications;
pub mod payments;
pub mod support;
pub mod trips;
pub mod users;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use bookings::BookingsApi;
pub use config::ApiConfig;
pub use error::ApiError;
pub use http::{ApiClient, UnauthorizedCallback};
pub use notifications::NotificationsApi;
pub use payments::PaymentsApi;
pub use support::SupportApi;
pub use trips::TripsApi;
pub use users::UsersApi;
