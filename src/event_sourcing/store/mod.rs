// ============================================================================
// Event Sourcing Store - Generic Persistence Layer
// ============================================================================
//
// In-memory, append-only storage for event streams plus the command handler
// that drives aggregates against it. Works with ANY aggregate/event type.
//
// ============================================================================

pub mod event_store;
pub mod command_handler;

pub use event_store::EventStore;
pub use command_handler::CommandHandler;
