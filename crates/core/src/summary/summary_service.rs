//! Aggregation operations over a portfolio snapshot.

use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::holdings::{Holding, HoldingType, PortfolioSnapshot};

use super::palette::sector_color;
use super::{AssetClassAllocation, PortfolioSummary, SectorAllocation};

/// Sums the current market value across all holdings.
pub fn total_value(snapshot: &PortfolioSnapshot) -> Decimal {
    snapshot.iter().map(Holding::current_value).sum()
}

/// Sums profit and loss across all holdings. Negative when the
/// portfolio is underwater.
pub fn total_profit_loss(snapshot: &PortfolioSnapshot) -> Decimal {
    snapshot.iter().map(Holding::profit_loss).sum()
}

/// Splits the portfolio value between equities and funds.
pub fn allocation_by_asset_class(snapshot: &PortfolioSnapshot) -> AssetClassAllocation {
    let mut allocation = AssetClassAllocation::default();
    for holding in snapshot {
        match holding.holding_type() {
            HoldingType::Equity => allocation.equity += holding.current_value(),
            HoldingType::Fund => allocation.fund += holding.current_value(),
        }
    }
    allocation
}

/// Aggregates equity value by sector bucket.
///
/// Funds carry no sector classification and are excluded; equities
/// without one land in the unknown bucket. An all-fund portfolio yields
/// an empty map.
pub fn allocation_by_sector(snapshot: &PortfolioSnapshot) -> HashMap<String, Decimal> {
    let mut sectors: HashMap<String, Decimal> = HashMap::new();

    for holding in snapshot {
        if let Some(sector) = holding.sector_bucket() {
            *sectors.entry(sector.to_string()).or_insert(Decimal::ZERO) +=
                holding.current_value();
        }
    }

    sectors
}

/// Builds presentation-ready sector rows: colored, with each sector's
/// share of the equity book, sorted by value descending.
///
/// Ties break by sector name so the ordering is fully deterministic.
pub fn sector_allocations(snapshot: &PortfolioSnapshot) -> Vec<SectorAllocation> {
    let sectors = allocation_by_sector(snapshot);
    let sector_total: Decimal = sectors.values().copied().sum();

    let mut allocations: Vec<SectorAllocation> = sectors
        .into_iter()
        .map(|(sector, value)| {
            let percentage = if sector_total > Decimal::ZERO {
                (value / sector_total * dec!(100)).round_dp(2)
            } else {
                Decimal::ZERO
            };

            SectorAllocation {
                color: sector_color(&sector).to_string(),
                sector,
                value,
                percentage,
            }
        })
        .collect();

    allocations.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.sector.cmp(&b.sector)));
    allocations
}

/// The `n` most valuable holdings, in descending value order.
///
/// The sort is stable, so holdings of equal value keep their snapshot
/// order. Asking for more than the snapshot holds returns everything.
pub fn top_holdings(snapshot: &PortfolioSnapshot, n: usize) -> Vec<&Holding> {
    let mut ranked: Vec<&Holding> = snapshot.iter().collect();
    ranked.sort_by(|a, b| b.current_value().cmp(&a.current_value()));
    ranked.truncate(n);
    ranked
}

/// Number of positions in the snapshot, counting both asset classes.
pub fn holding_count(snapshot: &PortfolioSnapshot) -> usize {
    snapshot.len()
}

/// Bundles every dashboard figure for one snapshot.
pub fn summarize(snapshot: &PortfolioSnapshot) -> PortfolioSummary {
    debug!("Summarizing snapshot with {} holdings", snapshot.len());

    PortfolioSummary {
        total_value: total_value(snapshot),
        total_profit_loss: total_profit_loss(snapshot),
        holding_count: holding_count(snapshot),
        asset_classes: allocation_by_asset_class(snapshot),
        sectors: sector_allocations(snapshot),
    }
}
