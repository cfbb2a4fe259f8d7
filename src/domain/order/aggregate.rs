use serde::{Deserialize, Serialize};

use crate::domain::money::is_positive;
use crate::event_sourcing::Aggregate;
use super::value_objects::OrderStatus;
use super::events::*;
use super::commands::OrderCommand;
use super::errors::OrderError;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // Identity
    id: String,
    version: i64,

    // Fixed at placement
    amount: f64,

    // Current State (derived from events)
    status: OrderStatus,
}

impl Order {
    /// Place an order in NEW status
    pub fn new(id: impl Into<String>, amount: f64) -> Result<Self, OrderError> {
        let (order, _) = Self::create(id.into(), &OrderCommand::Place { amount })?;
        Ok(order)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for Order {
    type Id = String;
    type Event = OrderEvent;
    type Command = OrderCommand;
    type Error = OrderError;

    fn handle_create(_id: &String, command: &OrderCommand) -> Result<OrderEvent, OrderError> {
        match command {
            OrderCommand::Place { amount } => {
                if !is_positive(*amount) {
                    return Err(OrderError::NonPositiveAmount(*amount));
                }
                Ok(OrderEvent::Placed(OrderPlaced { amount: *amount }))
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_first_event(id: &String, event: &OrderEvent) -> Result<Self, OrderError> {
        match event {
            OrderEvent::Placed(e) => {
                if !is_positive(e.amount) {
                    return Err(OrderError::NonPositiveAmount(e.amount));
                }
                Ok(Self {
                    id: id.clone(),
                    version: 1,
                    amount: e.amount,
                    status: OrderStatus::New,
                })
            }
            _ => Err(OrderError::NotInitialized),
        }
    }

    fn apply_event(&mut self, event: &OrderEvent) -> Result<(), OrderError> {
        match event {
            OrderEvent::Placed(_) => {
                // First event already applied
                return Ok(());
            }
            OrderEvent::Paid(_) => {
                self.status = OrderStatus::Paid;
            }
            OrderEvent::PaymentFailed(_) => {
                self.status = OrderStatus::Failed;
            }
        }

        self.version += 1;
        Ok(())
    }

    fn handle_command(&self, command: &OrderCommand) -> Result<Vec<OrderEvent>, OrderError> {
        match *command {
            OrderCommand::Place { .. } => Err(OrderError::NotInitialized),

            OrderCommand::ProcessPayment { payment_amount, enforce_terminal_status } => {
                if !is_positive(payment_amount) {
                    return Err(OrderError::NonPositivePayment(payment_amount));
                }
                if enforce_terminal_status && self.status.is_settled() {
                    return Err(OrderError::AlreadySettled {
                        order_id: self.id.clone(),
                        status: self.status,
                    });
                }

                let event = if payment_amount >= self.amount {
                    OrderEvent::Paid(OrderPaid {
                        payment_amount,
                        previous_status: self.status,
                    })
                } else {
                    OrderEvent::PaymentFailed(OrderPaymentFailed {
                        payment_amount,
                        previous_status: self.status,
                    })
                };
                Ok(vec![event])
            }
        }
    }

    fn aggregate_id(&self) -> &String {
        &self.id
    }

    fn version(&self) -> i64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_amount_sets_status_to_new() {
        let order = Order::new("O1", 100.0).unwrap();
        assert_eq!(order.id(), "O1");
        assert_eq!(order.amount(), 100.0);
        assert_eq!(order.status(), OrderStatus::New);
    }

    #[test]
    fn test_invalid_amount_rejected() {
        assert_eq!(Order::new("O2", 0.0).unwrap_err(), OrderError::NonPositiveAmount(0.0));
        assert_eq!(Order::new("O3", -50.0).unwrap_err(), OrderError::NonPositiveAmount(-50.0));
        assert!(Order::new("O4", f64::NAN).is_err());

        let err = Order::new("O5", 0.0).unwrap_err();
        assert_eq!(err.to_string(), "Order amount must be greater than zero.");
    }

    fn pay(payment_amount: f64, enforce_terminal_status: bool) -> OrderCommand {
        OrderCommand::ProcessPayment { payment_amount, enforce_terminal_status }
    }

    #[test]
    fn test_payment_transitions() {
        let mut order = Order::new("O1", 100.0).unwrap();

        let events = order.execute(&pay(100.0, false)).unwrap();
        assert_eq!(order.status(), OrderStatus::Paid);
        assert_eq!(
            events,
            vec![OrderEvent::Paid(OrderPaid {
                payment_amount: 100.0,
                previous_status: OrderStatus::New,
            })]
        );

        // Re-processing is allowed unless terminal status is enforced
        order.execute(&pay(10.0, false)).unwrap();
        assert_eq!(order.status(), OrderStatus::Failed);
        assert_eq!(order.version(), 3);
    }

    #[test]
    fn test_payment_amount_validated_by_aggregate() {
        let mut order = Order::new("O1", 100.0).unwrap();

        for payment_amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                order.execute(&pay(payment_amount, false)),
                Err(OrderError::NonPositivePayment(_))
            ));
        }
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.version(), 1);
    }

    #[test]
    fn test_settled_order_rejected_when_enforced() {
        let mut order = Order::new("O1", 100.0).unwrap();
        order.execute(&pay(50.0, true)).unwrap();

        assert_eq!(
            order.execute(&pay(100.0, true)).unwrap_err(),
            OrderError::AlreadySettled {
                order_id: "O1".to_string(),
                status: OrderStatus::Failed,
            }
        );
        assert_eq!(order.status(), OrderStatus::Failed);
        assert_eq!(order.version(), 2);
    }

    #[test]
    fn test_status_accessor_does_not_mutate() {
        let order = Order::new("O1", 100.0).unwrap();
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.status(), OrderStatus::New);
        assert_eq!(order.version(), 1);
    }

    #[test]
    fn test_place_twice_rejected() {
        let order = Order::new("O1", 100.0).unwrap();
        assert_eq!(
            order.handle_command(&OrderCommand::Place { amount: 5.0 }).unwrap_err(),
            OrderError::NotInitialized
        );
    }
}
