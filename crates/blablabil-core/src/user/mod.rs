pub mod model;

pub use model::{RidePreferences, User, UserUpdate};
