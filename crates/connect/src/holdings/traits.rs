//! Traits defining the contract for holdings retrieval and upload.

use std::path::Path;

use async_trait::async_trait;

use finfolio_core::{EquityHolding, FundHolding, HoldingType, PortfolioSnapshot, Result};

/// Trait for fetching data from the holdings backend.
#[async_trait]
pub trait HoldingsApiClient: Send + Sync {
    /// Fetch all equity holdings for the signed-in user.
    async fn get_equity_holdings(&self) -> Result<Vec<EquityHolding>>;

    /// Fetch all mutual fund holdings for the signed-in user.
    async fn get_fund_holdings(&self) -> Result<Vec<FundHolding>>;

    /// Upload a holdings spreadsheet for one asset class.
    async fn upload_holdings(
        &self,
        holding_type: HoldingType,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<()>;
}

/// Trait for the holdings sync service operations.
#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Fetch both asset classes concurrently and commit the merged
    /// snapshot. Either request failing fails the whole cycle and leaves
    /// the previous snapshot in place.
    async fn fetch_holdings(&self) -> Result<PortfolioSnapshot>;

    /// The most recently committed snapshot. Empty until the first
    /// successful fetch.
    fn snapshot(&self) -> PortfolioSnapshot;

    /// Validate and upload a spreadsheet for one asset class.
    ///
    /// The committed snapshot is not touched: callers refetch when they
    /// want the imported rows reflected.
    async fn upload_holdings(&self, holding_type: HoldingType, path: &Path) -> Result<()>;
}
