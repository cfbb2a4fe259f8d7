// ============================================================================
// Ledger Domain - Running Order Total
// ============================================================================
//
// An order reduced to its monetary total: discounts, tax and item additions
// or removals each move the total, which can never go below zero.
//
// ============================================================================

pub mod events;
pub mod commands;
pub mod errors;
pub mod aggregate;

pub use events::*;
pub use commands::*;
pub use errors::*;
pub use aggregate::*;
