//! Shared constants for the Finfolio domain.

/// Decimal precision used for displayed amounts.
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Bucket label for equity holdings without a sector classification.
pub const UNKNOWN_SECTOR_LABEL: &str = "Unknown";

/// Chart color reserved for the unknown-sector bucket.
pub const UNKNOWN_SECTOR_COLOR: &str = "#878580";

/// Number of holdings shown in the dashboard ranking.
pub const TOP_HOLDINGS_COUNT: usize = 5;

/// Currency symbol prefixed to displayed amounts.
pub const CURRENCY_SYMBOL: &str = "₹";
