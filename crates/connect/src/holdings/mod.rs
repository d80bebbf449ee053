//! Holdings module - fetch, snapshot tracking, and spreadsheet upload.

mod service;
mod traits;

pub use service::HoldingsService;
pub use traits::{HoldingsApiClient, HoldingsServiceTrait};
