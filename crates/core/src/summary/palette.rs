//! Deterministic color assignment for sector buckets.

use crate::constants::{UNKNOWN_SECTOR_COLOR, UNKNOWN_SECTOR_LABEL};

/// Fixed chart palette, indexed by a fold of the sector name.
const SECTOR_PALETTE: [&str; 12] = [
    "#4385be", "#da702c", "#879a39", "#8b7ec8", "#d14d41", "#3aa99f",
    "#d0a215", "#c437c2", "#66800b", "#205ea6", "#af3029", "#24837b",
];

/// Returns the display color for a sector bucket.
///
/// The choice depends only on the sector name, so the same portfolio
/// renders identically across refreshes and processes. The unknown
/// bucket keeps a reserved gray.
pub fn sector_color(sector: &str) -> &'static str {
    if sector == UNKNOWN_SECTOR_LABEL {
        return UNKNOWN_SECTOR_COLOR;
    }

    let hash = sector
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(byte as usize));
    SECTOR_PALETTE[hash % SECTOR_PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_color_is_stable() {
        assert_eq!(sector_color("Technology"), sector_color("Technology"));
        assert_eq!(sector_color("Energy"), sector_color("Energy"));
    }

    #[test]
    fn test_unknown_bucket_uses_reserved_gray() {
        assert_eq!(sector_color(UNKNOWN_SECTOR_LABEL), UNKNOWN_SECTOR_COLOR);
        assert!(!SECTOR_PALETTE.contains(&UNKNOWN_SECTOR_COLOR));
    }

    #[test]
    fn test_colors_come_from_the_palette() {
        for sector in ["Technology", "Financials", "Consumer Goods", "Pharma"] {
            assert!(SECTOR_PALETTE.contains(&sector_color(sector)));
        }
    }
}
