// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each entity has its own subdirectory. Mutable entities (product, ledger,
// order) are aggregates with:
// - Events
// - Commands
// - Errors
// - Aggregate implementation
//
// `student` is an immutable value-holding entity and `payment` is a
// stateless service over `order`.
//
// This layer is completely separate from the event sourcing infrastructure.
//
// ============================================================================

pub mod money;
pub mod errors;

pub mod student;
pub mod product;
pub mod ledger;
pub mod order;
pub mod payment;

pub use errors::DomainError;
