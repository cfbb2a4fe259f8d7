use serde::{Deserialize, Serialize};

use crate::event_sourcing::DomainEvent;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Events - Domain Events for Order Aggregate
// ============================================================================

/// Order Event - Union type for all order events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    Placed(OrderPlaced),
    Paid(OrderPaid),
    PaymentFailed(OrderPaymentFailed),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::Placed(_) => "OrderPlaced",
            OrderEvent::Paid(_) => "OrderPaid",
            OrderEvent::PaymentFailed(_) => "OrderPaymentFailed",
        }
    }
}

/// Order Placed - Initial event in order lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub amount: f64,
}

/// Order Paid - payment covered the amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPaid {
    pub payment_amount: f64,
    pub previous_status: OrderStatus,
}

/// Order Payment Failed - payment fell short of the amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderPaymentFailed {
    pub payment_amount: f64,
    pub previous_status: OrderStatus,
}
