//! Service for syncing holdings from the backend into a local snapshot.

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::{debug, info};

use finfolio_core::errors::UploadError;
use finfolio_core::{HoldingType, PortfolioSnapshot, Result};

use super::traits::{HoldingsApiClient, HoldingsServiceTrait};

/// Holder of the committed snapshot across fetch cycles.
///
/// Every cycle takes a ticket before issuing its requests and may only
/// commit while no later cycle has committed, so a slow response can
/// never overwrite a newer snapshot.
struct SnapshotCell {
    next_ticket: AtomicU64,
    committed: RwLock<(u64, PortfolioSnapshot)>,
}

impl SnapshotCell {
    fn new() -> Self {
        Self {
            next_ticket: AtomicU64::new(1),
            committed: RwLock::new((0, PortfolioSnapshot::default())),
        }
    }

    /// Reserves the ticket for a new fetch cycle.
    fn begin(&self) -> u64 {
        self.next_ticket.fetch_add(1, Ordering::SeqCst)
    }

    /// Commits `snapshot` for `ticket`. Returns false when a newer cycle
    /// already committed, leaving the cell untouched.
    fn commit(&self, ticket: u64, snapshot: PortfolioSnapshot) -> bool {
        let mut committed = self.committed.write().unwrap();
        if ticket <= committed.0 {
            return false;
        }
        *committed = (ticket, snapshot);
        true
    }

    /// The currently committed snapshot.
    fn get(&self) -> PortfolioSnapshot {
        self.committed.read().unwrap().1.clone()
    }
}

/// Service for fetching, holding, and uploading portfolio holdings.
pub struct HoldingsService {
    api: Arc<dyn HoldingsApiClient>,
    cell: SnapshotCell,
}

impl HoldingsService {
    pub fn new(api: Arc<dyn HoldingsApiClient>) -> Self {
        Self {
            api,
            cell: SnapshotCell::new(),
        }
    }
}

#[async_trait]
impl HoldingsServiceTrait for HoldingsService {
    async fn fetch_holdings(&self) -> Result<PortfolioSnapshot> {
        let ticket = self.cell.begin();
        debug!("Fetching holdings (cycle {})", ticket);

        // Both classes in parallel; the first failure wins and nothing
        // partial is kept.
        let (equities, funds) = tokio::try_join!(
            self.api.get_equity_holdings(),
            self.api.get_fund_holdings(),
        )?;

        let snapshot = PortfolioSnapshot::assemble(equities, funds);
        if self.cell.commit(ticket, snapshot.clone()) {
            info!(
                "Committed snapshot with {} holdings (cycle {})",
                snapshot.len(),
                ticket
            );
            Ok(snapshot)
        } else {
            debug!("Discarding superseded fetch result (cycle {})", ticket);
            Ok(self.cell.get())
        }
    }

    fn snapshot(&self) -> PortfolioSnapshot {
        self.cell.get()
    }

    async fn upload_holdings(&self, holding_type: HoldingType, path: &Path) -> Result<()> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
            .to_string();

        // Same check the backend applies, so a bad pick fails before any
        // bytes move.
        if !file_name.ends_with(".xlsx") {
            return Err(UploadError::UnsupportedFile(file_name).into());
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| UploadError::Read {
            file: path.display().to_string(),
            detail: e.to_string(),
        })?;

        debug!(
            "Uploading {} ({} bytes) as {:?} holdings",
            file_name,
            bytes.len(),
            holding_type
        );
        self.api.upload_holdings(holding_type, &file_name, bytes).await
    }
}
