use std::sync::Arc;
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::domain::order::{Order, OrderCommand, OrderError, OrderStatus};
use crate::event_sourcing::{Aggregate, CommandHandler};
use crate::metrics::Metrics;
use super::errors::PaymentError;

// ============================================================================
// Payment Service
// ============================================================================
//
// Drives the order's payment rule:
//   payment <= 0            → rejected, order untouched
//   payment >= order.amount → PAID
//   otherwise               → FAILED
//
// The rule itself is evaluated by the `Order` aggregate, so a stored order is
// checked against the same state its version check protects. With the default
// configuration an order may be processed again and re-transitioned;
// `enforce_terminal_status` turns PAID / FAILED into true terminal states.
//
// ============================================================================

#[derive(Clone, Default)]
pub struct PaymentService {
    config: PaymentConfig,
    metrics: Option<Arc<Metrics>>,
}

impl PaymentService {
    pub fn new(config: PaymentConfig) -> Self {
        Self { config, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Status a payment would lead to, without touching the order
    pub fn evaluate(&self, order: &Order, payment_amount: f64) -> Result<OrderStatus, PaymentError> {
        let mut preview = order.clone();
        preview.execute(&self.payment_command(payment_amount))?;
        Ok(preview.status())
    }

    /// Evaluate a payment and transition the order in place
    pub fn process_payment(&self, order: &mut Order, payment_amount: f64) -> Result<(), PaymentError> {
        if let Err(e) = order.execute(&self.payment_command(payment_amount)) {
            self.record("REJECTED");
            return Err(e.into());
        }

        self.settled(order.id(), payment_amount, order.status());
        Ok(())
    }

    /// Same as `process_payment`, for orders kept in an event store.
    ///
    /// Each call is its own payment attempt and is recorded as the causation
    /// of the resulting event.
    pub fn process_stored(
        &self,
        handler: &CommandHandler<Order>,
        order_id: &str,
        payment_amount: f64,
        correlation_id: Uuid,
    ) -> anyhow::Result<OrderStatus> {
        let order_id = order_id.to_string();
        let payment_id = Uuid::new_v4();
        let command = self.payment_command(payment_amount);

        if let Err(e) = handler.handle_caused_by(order_id.clone(), command, correlation_id, payment_id) {
            return match e.downcast_ref::<OrderError>() {
                Some(order_error) => {
                    self.record("REJECTED");
                    Err(PaymentError::from(order_error.clone()).into())
                }
                None => Err(e),
            };
        }

        let status = handler.load(&order_id)?.status();
        tracing::debug!(order_id = %order_id, payment_id = %payment_id, "Stored payment appended");
        self.settled(&order_id, payment_amount, status);
        Ok(status)
    }

    fn payment_command(&self, payment_amount: f64) -> OrderCommand {
        OrderCommand::ProcessPayment {
            payment_amount,
            enforce_terminal_status: self.config.enforce_terminal_status,
        }
    }

    fn settled(&self, order_id: &str, payment_amount: f64, status: OrderStatus) {
        tracing::info!(
            order_id = %order_id,
            payment_amount = payment_amount,
            status = %status,
            "Payment processed"
        );
        self.record(status.as_str());
    }

    fn record(&self, outcome: &str) {
        if let Some(metrics) = &self.metrics {
            metrics.record_payment(outcome);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
