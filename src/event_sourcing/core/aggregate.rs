use anyhow::Result;
use super::event::EventEnvelope;

// ============================================================================
// Aggregate Root Pattern - Event Sourcing Core
// ============================================================================
//
// Key Principles:
// 1. State is derived from events (not stored directly)
// 2. Commands are validated before emitting events
// 3. A rejected command emits nothing and leaves state untouched
// 4. Aggregates enforce business invariants
// 5. All state changes flow through events
//
// This is the GENERIC aggregate trait that works for ANY domain aggregate.
//
// ============================================================================

/// Generic Aggregate trait - all event-sourced aggregates implement this
///
/// Type Parameters:
/// - `Id`: The business identifier of the aggregate
/// - `Event`: The domain event type for this aggregate
/// - `Command`: The command type for this aggregate
/// - `Error`: The error type for business rule violations
pub trait Aggregate: Sized {
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display;
    type Event;
    type Command;
    type Error;

    /// Validate a creation command and emit the event that opens the stream
    fn handle_create(id: &Self::Id, command: &Self::Command) -> Result<Self::Event, Self::Error>;

    /// Create new aggregate from first event
    fn apply_first_event(id: &Self::Id, event: &Self::Event) -> Result<Self, Self::Error>;

    /// Apply subsequent events to update state
    fn apply_event(&mut self, event: &Self::Event) -> Result<(), Self::Error>;

    /// Handle command and emit events (business logic)
    fn handle_command(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error>;

    /// Get aggregate ID
    fn aggregate_id(&self) -> &Self::Id;

    /// Get current version (number of applied events)
    fn version(&self) -> i64;

    /// Run a creation command and build the aggregate from its first event
    fn create(id: Self::Id, command: &Self::Command) -> Result<(Self, Self::Event), Self::Error> {
        let event = Self::handle_create(&id, command)?;
        let aggregate = Self::apply_first_event(&id, &event)?;
        Ok((aggregate, event))
    }

    /// Handle a command and apply the resulting events in place
    fn execute(&mut self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let events = self.handle_command(command)?;
        for event in &events {
            self.apply_event(event)?;
        }
        Ok(events)
    }

    /// Load aggregate from event history (reconstruct from events)
    fn load_from_events(events: &[EventEnvelope<Self::Id, Self::Event>]) -> Result<Self>
    where
        Self::Error: std::fmt::Display,
    {
        let (first, rest) = match events.split_first() {
            Some(split) => split,
            None => anyhow::bail!("No events to load"),
        };

        // Apply first event to create aggregate
        let mut aggregate = Self::apply_first_event(&first.aggregate_id, &first.event_data)
            .map_err(|e| anyhow::anyhow!("Failed to apply first event: {}", e))?;

        // Apply remaining events
        for envelope in rest {
            aggregate.apply_event(&envelope.event_data)
                .map_err(|e| anyhow::anyhow!("Failed to apply event: {}", e))?;
        }

        Ok(aggregate)
    }
}
