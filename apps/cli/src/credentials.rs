//! File-backed credential store.
//!
//! The credential is kept as a small versioned JSON document under the
//! data directory, so a sign-in survives restarts without the backend
//! being reachable.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use finfolio_connect::{CredentialStore, StoredCredential};
use finfolio_core::{Error, Result};

const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CredentialDocument {
    version: u32,
    credential: Option<StoredCredential>,
}

impl Default for CredentialDocument {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            credential: None,
        }
    }
}

pub struct FileCredentialStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            guard: Mutex::new(()),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.guard
            .lock()
            .map_err(|_| Error::Session("credential store lock poisoned".to_string()))
    }

    fn read_document(&self) -> Result<CredentialDocument> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(CredentialDocument::default())
            }
            Err(e) => {
                return Err(Error::Session(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(CredentialDocument::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            Error::Session(format!(
                "corrupt credential file {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    fn write_document(&self, document: &CredentialDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Session(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }
        let raw = serde_json::to_string_pretty(document)
            .map_err(|e| Error::Session(format!("failed to encode credential: {}", e)))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            Error::Session(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredential>> {
        let _guard = self.lock()?;
        Ok(self.read_document()?.credential)
    }

    fn store(&self, credential: &StoredCredential) -> Result<()> {
        let _guard = self.lock()?;
        self.write_document(&CredentialDocument {
            version: CURRENT_VERSION,
            credential: Some(credential.clone()),
        })
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.lock()?;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Session(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
