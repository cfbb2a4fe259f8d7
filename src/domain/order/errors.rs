use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order amount must be greater than zero.")]
    NonPositiveAmount(f64),

    #[error("Payment amount must be greater than zero.")]
    NonPositivePayment(f64),

    #[error("Order {order_id} is already {status}.")]
    AlreadySettled { order_id: String, status: OrderStatus },

    #[error("Aggregate not initialized")]
    NotInitialized,
}
