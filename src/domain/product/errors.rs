use super::value_objects::MAX_STOCK;

// ============================================================================
// Product Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductError {
    #[error("Price cannot be negative.")]
    NegativePrice(f64),

    #[error("Initial stock {0} is outside 0..={max}.", max = MAX_STOCK)]
    InvalidInitialStock(u32),

    #[error("Amount cannot be negative.")]
    NegativeAmount(i32),

    #[error("Amount must be greater than zero.")]
    ZeroAmount,

    #[error("Stock cannot exceed {max}.", max = MAX_STOCK)]
    StockOverflow { current: u32, amount: u32 },

    #[error("Quantity must be greater than zero.")]
    NonPositiveQuantity(i32),

    #[error("Cannot remove {requested} units, only {available} in stock.")]
    InsufficientStock { requested: u32, available: u32 },

    #[error("Discount cannot be negative.")]
    NegativeDiscount(f64),

    #[error("Aggregate not initialized")]
    NotInitialized,
}
