// ============================================================================
// Student Domain - Graded Entity
// ============================================================================
//
// Immutable: a student is validated once on construction and only ever read
// afterwards, so there are no commands or events here.
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod entity;
pub mod grading;

pub use value_objects::*;
pub use errors::*;
pub use entity::*;
pub use grading::*;
