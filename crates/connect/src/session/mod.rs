//! Session module - bearer-token state and credential persistence.

mod manager;
mod models;
mod traits;

pub use manager::SessionManager;
pub use models::{SessionState, StoredCredential};
pub use traits::{CredentialStore, SessionInvalidationHandler};
