//! Holdings domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::UNKNOWN_SECTOR_LABEL;

/// The two asset classes the backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HoldingType {
    Equity,
    Fund,
}

/// Wire record for one equity position, as returned by the stock
/// holdings endpoint.
///
/// Numeric fields default to zero and text fields to empty: the backend
/// stores blank spreadsheet cells as nulls and a partial record must not
/// fail the whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EquityHolding {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub isin: String,
    #[serde(default)]
    pub ticker: Option<String>,
    /// Sector classification; absent for unclassified scrips.
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub quantity: Decimal,
    #[serde(default)]
    pub avg_buy_price: Decimal,
    #[serde(default)]
    pub buy_value: Decimal,
    #[serde(default)]
    pub closing_price: Decimal,
    #[serde(default)]
    pub closing_value: Decimal,
    #[serde(default)]
    pub unrealized_pnl: Decimal,
}

/// Wire record for one mutual fund position, as returned by the mutual
/// fund holdings endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct FundHolding {
    pub id: i64,
    #[serde(default)]
    pub scheme_name: String,
    #[serde(default)]
    pub amc: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sub_category: String,
    #[serde(default)]
    pub folio_no: String,
    /// Platform or broker the folio was imported from.
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub units: Decimal,
    #[serde(default)]
    pub invested_value: Decimal,
    #[serde(default)]
    pub current_value: Decimal,
    #[serde(default)]
    pub returns: Decimal,
    /// Annualized return as reported by the importer, kept verbatim
    /// because some sources send placeholders like "N/A".
    #[serde(default)]
    pub xirr: String,
}

/// A single position of either asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "holding_type", rename_all = "camelCase")]
pub enum Holding {
    Equity(EquityHolding),
    Fund(FundHolding),
}

impl Holding {
    pub fn holding_type(&self) -> HoldingType {
        match self {
            Holding::Equity(_) => HoldingType::Equity,
            Holding::Fund(_) => HoldingType::Fund,
        }
    }

    /// Backend row id. Unique per asset class, not across classes.
    pub fn id(&self) -> i64 {
        match self {
            Holding::Equity(equity) => equity.id,
            Holding::Fund(fund) => fund.id,
        }
    }

    /// Human-readable label: company name for equities, scheme name for
    /// funds.
    pub fn display_name(&self) -> &str {
        match self {
            Holding::Equity(equity) => &equity.name,
            Holding::Fund(fund) => &fund.scheme_name,
        }
    }

    /// Market value of the position as of the backend's last refresh.
    pub fn current_value(&self) -> Decimal {
        match self {
            Holding::Equity(equity) => equity.closing_value,
            Holding::Fund(fund) => fund.current_value,
        }
    }

    /// Absolute profit or loss: unrealized P&L for equities, cumulative
    /// returns for funds.
    pub fn profit_loss(&self) -> Decimal {
        match self {
            Holding::Equity(equity) => equity.unrealized_pnl,
            Holding::Fund(fund) => fund.returns,
        }
    }

    /// Sector classification, trimmed. `None` for funds and for equities
    /// whose sector is absent or blank.
    pub fn sector(&self) -> Option<&str> {
        match self {
            Holding::Equity(equity) => equity
                .sector
                .as_deref()
                .map(str::trim)
                .filter(|sector| !sector.is_empty()),
            Holding::Fund(_) => None,
        }
    }

    /// Sector bucket this holding contributes to, with unclassified
    /// equities falling back to the shared unknown label.
    pub fn sector_bucket(&self) -> Option<&str> {
        match self {
            Holding::Equity(_) => Some(self.sector().unwrap_or(UNKNOWN_SECTOR_LABEL)),
            Holding::Fund(_) => None,
        }
    }
}

/// The unified view of a portfolio produced by one fetch cycle.
///
/// Holdings keep a stable order: equities first, then funds, each in
/// backend response order. A snapshot is immutable once assembled and is
/// replaced wholesale by the next successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PortfolioSnapshot {
    holdings: Vec<Holding>,
}

impl PortfolioSnapshot {
    /// Merges the two per-class responses into one snapshot.
    pub fn assemble(equities: Vec<EquityHolding>, funds: Vec<FundHolding>) -> Self {
        let mut holdings = Vec::with_capacity(equities.len() + funds.len());
        holdings.extend(equities.into_iter().map(Holding::Equity));
        holdings.extend(funds.into_iter().map(Holding::Fund));
        Self { holdings }
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Holding> {
        self.holdings.iter()
    }

    /// Holdings of one asset class, in snapshot order.
    pub fn of_type(&self, holding_type: HoldingType) -> impl Iterator<Item = &Holding> {
        self.holdings
            .iter()
            .filter(move |holding| holding.holding_type() == holding_type)
    }
}

impl<'a> IntoIterator for &'a PortfolioSnapshot {
    type Item = &'a Holding;
    type IntoIter = std::slice::Iter<'a, Holding>;

    fn into_iter(self) -> Self::IntoIter {
        self.holdings.iter()
    }
}
