//! Holdings module - wire records and the portfolio snapshot.

mod holdings_model;

pub use holdings_model::{EquityHolding, FundHolding, Holding, HoldingType, PortfolioSnapshot};
