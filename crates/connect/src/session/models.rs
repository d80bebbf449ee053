//! Session domain models.

use serde::{Deserialize, Serialize};

/// Credential persisted between runs so a sign-in survives restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredential {
    pub token: String,
    pub email: String,
}

/// In-memory session state.
///
/// A session counts as authenticated only while it holds a non-empty
/// bearer token.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub token: Option<String>,
    pub email: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|token| !token.is_empty())
    }
}
