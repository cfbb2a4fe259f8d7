// ============================================================================
// Product Value Objects
// ============================================================================

/// Upper bound for the stock of a single product
pub const MAX_STOCK: u32 = 100;

/// Price after a discount, never below zero
pub fn discounted_price(price: f64, discount: f64) -> f64 {
    (price - discount).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_price_clamps_at_zero() {
        assert_eq!(discounted_price(1000.0, 100.0), 900.0);
        assert_eq!(discounted_price(50.0, 100.0), 0.0);
        assert_eq!(discounted_price(50.0, 50.0), 0.0);
    }
}
