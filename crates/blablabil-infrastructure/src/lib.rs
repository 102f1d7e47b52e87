pub mod paths;
pub mod storage;

pub use crate::storage::{FileCredentialStore, MemoryCredentialStore};
