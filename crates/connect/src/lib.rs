//! Finfolio Connect - session and transport layer for the holdings backend.
//!
//! This crate owns everything that talks to the backend: the bearer-token
//! session and its persistence contract, the HTTP client, and the holdings
//! sync service that turns the two per-class endpoints into one portfolio
//! snapshot.

pub mod client;
pub mod holdings;
pub mod session;

// Re-export commonly used types
pub use client::{ApiClient, DEFAULT_API_URL};
pub use holdings::{HoldingsApiClient, HoldingsService, HoldingsServiceTrait};
pub use session::{
    CredentialStore, SessionInvalidationHandler, SessionManager, SessionState, StoredCredential,
};
