// ============================================================================
// Order Commands
// ============================================================================

/// Status only changes through `ProcessPayment`, which the aggregate
/// evaluates against its own amount and status
#[derive(Debug, Clone)]
pub enum OrderCommand {
    Place {
        amount: f64,
    },
    ProcessPayment {
        payment_amount: f64,
        /// Reject when the order is already PAID or FAILED
        enforce_terminal_status: bool,
    },
}
