// ============================================================================
// Payment Domain - Stateless payment evaluation
// ============================================================================

pub mod errors;
pub mod service;

pub use errors::*;
pub use service::*;
