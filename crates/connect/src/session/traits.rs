//! Traits defining the contracts around session state.

use finfolio_core::Result;

use super::models::StoredCredential;

/// Trait for persisting the session credential between runs.
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, if any. A missing store is not an
    /// error.
    fn load(&self) -> Result<Option<StoredCredential>>;

    /// Persist the credential, replacing any previous one.
    fn store(&self, credential: &StoredCredential) -> Result<()>;

    /// Remove the stored credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// Trait for reacting to a request rejected as unauthorized.
///
/// The transport layer invokes this once per failing request, before the
/// error propagates to the caller. The production handler is the session
/// manager itself, which discards the dead credential so the next
/// request starts clean.
pub trait SessionInvalidationHandler: Send + Sync {
    fn on_unauthorized(&self);
}
