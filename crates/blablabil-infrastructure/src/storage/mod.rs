//! Credential storage backends.

mod file_credential_store;
mod memory_credential_store;

pub use file_credential_store::FileCredentialStore;
pub use memory_credential_store::MemoryCredentialStore;
