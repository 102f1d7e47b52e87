pub mod model;

pub use model::{Notification, NotificationId, Severity};
