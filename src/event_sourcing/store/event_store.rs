use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use anyhow::{Result, anyhow, bail};
use serde::Serialize;

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope, serialize_event};

// ============================================================================
// Generic Event Store - Repository for Events
// ============================================================================
//
// This is a GENERIC event store that works with ANY event type.
//
// Type Parameters:
// - `Id`: The aggregate identifier type
// - `E`: The domain event type (must implement DomainEvent trait)
//
// Responsibilities:
// 1. Append events to per-aggregate streams (append-only)
// 2. Load event history for aggregates
// 3. Ensure optimistic concurrency control
//
// ============================================================================

pub struct EventStore<Id, E> {
    aggregate_type_name: String,  // e.g., "Product", "LedgerOrder", "Order"
    streams: RwLock<HashMap<Id, Vec<EventEnvelope<Id, E>>>>,
}

impl<Id, E> EventStore<Id, E>
where
    Id: Clone + Eq + Hash + Display,
    E: DomainEvent,
{
    pub fn new(aggregate_type_name: &str) -> Self {
        Self {
            aggregate_type_name: aggregate_type_name.to_string(),
            streams: RwLock::new(HashMap::new()),
        }
    }

    pub fn aggregate_type_name(&self) -> &str {
        &self.aggregate_type_name
    }

    /// Append events to the event store
    /// Returns the new version number after appending
    pub fn append_events(
        &self,
        aggregate_id: &Id,
        expected_version: i64,
        events: Vec<EventEnvelope<Id, E>>,
    ) -> Result<i64> {
        if events.is_empty() {
            bail!("Cannot append empty event list");
        }

        let mut streams = self.write()?;

        // Check optimistic concurrency
        let current_version = streams.get(aggregate_id).map_or(0, |stream| stream.len() as i64);
        if current_version != expected_version {
            bail!(
                "Concurrency conflict: expected version {}, but current is {}",
                expected_version,
                current_version
            );
        }

        let mut new_version = expected_version;
        for envelope in &events {
            new_version += 1;

            if envelope.aggregate_id != *aggregate_id {
                bail!(
                    "Event for aggregate {} cannot be appended to stream {}",
                    envelope.aggregate_id,
                    aggregate_id
                );
            }
            if envelope.sequence_number != new_version {
                bail!(
                    "Sequence gap: expected {}, got {}",
                    new_version,
                    envelope.sequence_number
                );
            }
        }

        // Streams only come into existence with their first accepted batch
        let event_count = events.len();
        streams.entry(aggregate_id.clone()).or_default().extend(events);

        tracing::info!(
            aggregate_id = %aggregate_id,
            aggregate_type = %self.aggregate_type_name,
            new_version = new_version,
            event_count = event_count,
            "Appended events to event store"
        );

        Ok(new_version)
    }

    /// Load all events for an aggregate, oldest first
    pub fn load_events(&self, aggregate_id: &Id) -> Result<Vec<EventEnvelope<Id, E>>> {
        let streams = self.read()?;
        let events = streams.get(aggregate_id).cloned().unwrap_or_default();

        tracing::debug!("Loaded {} events for aggregate {}", events.len(), aggregate_id);
        Ok(events)
    }

    /// Get current version of aggregate (0 = no stream)
    pub fn current_version(&self, aggregate_id: &Id) -> Result<i64> {
        let streams = self.read()?;
        Ok(streams.get(aggregate_id).map_or(0, |stream| stream.len() as i64))
    }

    /// Load aggregate from events
    pub fn load_aggregate<A>(&self, aggregate_id: &Id) -> Result<A>
    where
        A: Aggregate<Id = Id, Event = E>,
        <A as Aggregate>::Error: Display,
    {
        let events = self.load_events(aggregate_id)?;

        if events.is_empty() {
            bail!("Aggregate not found: {}", aggregate_id);
        }

        A::load_from_events(&events)
    }

    /// Check if aggregate exists
    pub fn aggregate_exists(&self, aggregate_id: &Id) -> Result<bool> {
        Ok(self.current_version(aggregate_id)? > 0)
    }

    /// Serialize a whole stream as a JSON array (audit export)
    pub fn export_stream(&self, aggregate_id: &Id) -> Result<String>
    where
        Id: Serialize,
    {
        let events = self.load_events(aggregate_id)?;
        serialize_event(&events)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Id, Vec<EventEnvelope<Id, E>>>>> {
        self.streams
            .read()
            .map_err(|_| anyhow!("{} event store lock poisoned", self.aggregate_type_name))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Id, Vec<EventEnvelope<Id, E>>>>> {
        self.streams
            .write()
            .map_err(|_| anyhow!("{} event store lock poisoned", self.aggregate_type_name))
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
