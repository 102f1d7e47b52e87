pub mod auth;
pub mod bookings;
pub mod guard;
pub mod trips;
