//! Summary module - pure aggregations over a portfolio snapshot.
//!
//! Everything here is a function of the snapshot alone, so the dashboard
//! can be recomputed (and tested) without touching the network.

mod palette;
mod summary_model;
mod summary_service;

pub use palette::sector_color;
pub use summary_model::{AssetClassAllocation, PortfolioSummary, SectorAllocation};
pub use summary_service::*;
