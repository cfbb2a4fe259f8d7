// ============================================================================
// Order Domain - Payment-Bearing Order
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderStatus)
// - Events (OrderPlaced, OrderPaid, OrderPaymentFailed)
// - Commands (Place, ProcessPayment)
// - Errors (OrderError enum)
// - Aggregate (Order with business logic)
//
// The payment rule lives in the aggregate; `domain::payment::PaymentService`
// drives it in place or through the event store.
//
// ============================================================================

pub mod value_objects;
pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

// Re-export for convenience
pub use value_objects::*;
pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
