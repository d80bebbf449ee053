//! Session manager: owns the in-memory session and keeps the credential
//! store in sync with it.

use std::sync::{Arc, RwLock};

use log::{debug, warn};

use finfolio_core::Result;

use super::models::{SessionState, StoredCredential};
use super::traits::{CredentialStore, SessionInvalidationHandler};

/// Thread-safe holder of the current session.
///
/// On construction the manager restores any persisted credential, so a
/// sign-in from a previous run is picked up without talking to the
/// backend. State changes are written through to the credential store.
pub struct SessionManager {
    state: RwLock<SessionState>,
    store: Arc<dyn CredentialStore>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let state = match store.load() {
            Ok(Some(credential)) => {
                debug!("Restored persisted session for {}", credential.email);
                SessionState {
                    token: Some(credential.token),
                    email: Some(credential.email),
                }
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                warn!("Failed to restore persisted session: {}", e);
                SessionState::default()
            }
        };

        Self {
            state: RwLock::new(state),
            store,
        }
    }

    /// Whether a usable session is held right now.
    pub fn has_session(&self) -> bool {
        self.state.read().unwrap().is_authenticated()
    }

    /// Email of the signed-in user, if any.
    pub fn current_user(&self) -> Option<String> {
        let state = self.state.read().unwrap();
        if state.is_authenticated() {
            state.email.clone()
        } else {
            None
        }
    }

    /// Attaches the bearer credential to an outgoing request. Requests
    /// go out untouched while no session is held.
    pub fn attach(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let state = self.state.read().unwrap();
        match state.token.as_deref() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    /// Installs a fresh credential after a successful token exchange.
    ///
    /// The credential is persisted first; the in-memory session only
    /// changes once the write succeeds, so a disk failure leaves the
    /// previous state intact.
    pub fn establish(&self, token: &str, email: &str) -> Result<()> {
        let credential = StoredCredential {
            token: token.to_string(),
            email: email.to_string(),
        };
        self.store.store(&credential)?;

        let mut state = self.state.write().unwrap();
        state.token = Some(credential.token);
        state.email = Some(credential.email);
        Ok(())
    }

    /// Discards the session in memory and on disk. Safe to call when no
    /// session is held.
    pub fn logout(&self) -> Result<()> {
        {
            let mut state = self.state.write().unwrap();
            state.token = None;
            state.email = None;
        }
        self.store.clear()
    }
}

impl SessionInvalidationHandler for SessionManager {
    /// Drops the rejected credential and any cached identity. Store
    /// failures are logged; the trait has no error channel.
    fn on_unauthorized(&self) {
        warn!("Session rejected by backend, discarding stored credential");
        if let Err(e) = self.logout() {
            warn!("Failed to clear credential store after rejection: {}", e);
        }
    }
}
