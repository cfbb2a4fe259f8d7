use crate::domain::order::{OrderError, OrderStatus};

// ============================================================================
// Payment Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment amount must be greater than zero.")]
    NonPositivePayment(f64),

    #[error("Order {order_id} is already {status}.")]
    AlreadySettled { order_id: String, status: OrderStatus },

    #[error(transparent)]
    Order(OrderError),
}

/// Payment rejections are decided by the order aggregate
impl From<OrderError> for PaymentError {
    fn from(error: OrderError) -> Self {
        match error {
            OrderError::NonPositivePayment(amount) => PaymentError::NonPositivePayment(amount),
            OrderError::AlreadySettled { order_id, status } => {
                PaymentError::AlreadySettled { order_id, status }
            }
            other => PaymentError::Order(other),
        }
    }
}
