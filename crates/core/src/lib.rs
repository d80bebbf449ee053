//! Finfolio Core
//!
//! Domain models and the aggregation engine for the Finfolio portfolio
//! tracker. This crate is I/O free: it defines the holdings wire records,
//! the portfolio snapshot they assemble into, and the pure computations
//! that derive dashboard figures from a snapshot. Networking and session
//! state live in `finfolio-connect`.

pub mod constants;
pub mod errors;
pub mod holdings;
pub mod summary;

// Re-export the error types at the crate root.
pub use errors::{Error, Result};

// Re-export the domain models and operations.
pub use holdings::{
    EquityHolding, FundHolding, Holding, HoldingType, PortfolioSnapshot,
};
pub use summary::{
    allocation_by_asset_class, allocation_by_sector, holding_count, sector_allocations,
    sector_color, summarize, top_holdings, total_profit_loss, total_value,
    AssetClassAllocation, PortfolioSummary, SectorAllocation,
};
