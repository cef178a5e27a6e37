//! Storefront pricing conventions layered on top of the raw quote
//!
//! The checkout UI never shows the raw tariff number: it inflates it by
//! 30% as a handling buffer and rounds up to the next multiple of 10.
//! Reproducing displayed prices bit-exactly requires this exact rule.

/// Displayed price for a raw quote: `ceil(total * 1.3 / 10) * 10`.
///
/// Computed in integer arithmetic, so the result is exact: always a
/// multiple of 10 and always >= `total`.
pub fn display_price(total: u32) -> u32 {
    // ceil(total * 1.3 / 10) == ceil(total * 13 / 100)
    (total * 13).div_ceil(100) * 10
}

/// Cart weight in grams: Σ per-item weight (kg) × 1000 × quantity.
///
/// Items without a recorded weight contribute 0 (callers pass 0.0), which
/// is what makes the zero-weight default slab reachable in practice.
pub fn cart_weight_grams(items: &[(f64, u32)]) -> i64 {
    items
        .iter()
        .map(|(kg, qty)| (kg * 1000.0).round() as i64 * i64::from(*qty))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_price_examples() {
        assert_eq!(display_price(0), 0);
        assert_eq!(display_price(45), 60); // 58.5 -> 60
        assert_eq!(display_price(60), 80); // 78.0 -> 80
        assert_eq!(display_price(100), 130); // exact multiple stays
        assert_eq!(display_price(140), 190); // 182.0 -> 190
    }

    #[test]
    fn test_display_price_bounds() {
        for total in 0..2000 {
            let shown = display_price(total);
            assert_eq!(shown % 10, 0);
            assert!(shown >= total);
        }
    }

    #[test]
    fn test_cart_weight() {
        let items = [(0.25, 2), (1.2, 1), (0.0, 3)];
        assert_eq!(cart_weight_grams(&items), 1700);
        assert_eq!(cart_weight_grams(&[]), 0);
    }
}
