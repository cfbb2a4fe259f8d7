// ============================================================================
// Ledger Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("Total amount must be non-negative")]
    NegativeTotal(f64),

    #[error("Discount must not be negative")]
    NegativeDiscount(f64),

    #[error("Discount must not exceed total amount")]
    DiscountExceedsTotal { discount: f64, total: f64 },

    #[error("Tax rate must not be negative")]
    NegativeTaxRate(f64),

    #[error("Item price must be non-negative")]
    NegativeItemPrice(f64),

    #[error("Item price exceeds total amount")]
    ItemPriceExceedsTotal { price: f64, total: f64 },

    #[error("Total amount out of range")]
    TotalOutOfRange { total: f64 },

    #[error("Aggregate not initialized")]
    NotInitialized,
}
