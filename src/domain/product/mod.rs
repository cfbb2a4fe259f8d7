// ============================================================================
// Product Domain - Inventory Item
// ============================================================================
//
// A product with a non-negative price and a stock level bounded to
// 0..=MAX_STOCK. Every mutation is a command validated by the aggregate:
// - Value objects (MAX_STOCK)
// - Events (ProductRegistered, StockIncreased, ...)
// - Commands (Register, IncreaseStock, ...)
// - Errors (ProductError enum)
// - Aggregate (Product with business logic)
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
