//! Presentation models for portfolio summaries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio value split across the two asset classes.
///
/// Both buckets are always present; a class with no holdings reports
/// zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssetClassAllocation {
    pub equity: Decimal,
    pub fund: Decimal,
}

/// One sector's share of the equity book, ready for chart rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorAllocation {
    pub sector: String,
    /// Stable display color derived from the sector name.
    pub color: String,
    pub value: Decimal,
    /// Share of the equity book, rounded to two decimal places.
    pub percentage: Decimal,
}

/// Everything the dashboard needs, derived from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_profit_loss: Decimal,
    pub holding_count: usize,
    pub asset_classes: AssetClassAllocation,
    pub sectors: Vec<SectorAllocation>,
}
