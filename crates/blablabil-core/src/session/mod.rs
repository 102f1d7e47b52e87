pub mod model;
pub mod store;

pub use model::{AuthOutcome, SessionSnapshot, SessionState};
pub use store::CredentialStore;
