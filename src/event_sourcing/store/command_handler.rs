use std::sync::Arc;
use uuid::Uuid;
use anyhow::{Result, bail};

use crate::event_sourcing::core::{Aggregate, DomainEvent, EventEnvelope};
use crate::metrics::Metrics;
use super::event_store::EventStore;

// ============================================================================
// Command Handler
// ============================================================================
//
// Orchestrates: Command → Aggregate → Events → Event Store
//
// Generic over the aggregate, so Product, LedgerOrder and Order all share
// the same load / validate / append cycle. A rejected command appends
// nothing.
//
// ============================================================================

pub struct CommandHandler<A: Aggregate> {
    event_store: Arc<EventStore<A::Id, A::Event>>,
    metrics: Option<Arc<Metrics>>,
}

impl<A> CommandHandler<A>
where
    A: Aggregate,
    A::Event: DomainEvent,
    A::Error: std::error::Error + Send + Sync + 'static,
{
    pub fn new(event_store: Arc<EventStore<A::Id, A::Event>>) -> Self {
        Self { event_store, metrics: None }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn event_store(&self) -> &Arc<EventStore<A::Id, A::Event>> {
        &self.event_store
    }

    /// Open a new stream with a creation command
    pub fn create(&self, aggregate_id: A::Id, command: A::Command, correlation_id: Uuid) -> Result<i64> {
        if self.event_store.aggregate_exists(&aggregate_id)? {
            bail!("Aggregate already exists: {}", aggregate_id);
        }

        let (_, event) = A::create(aggregate_id.clone(), &command)
            .map_err(|e| self.rejected(&aggregate_id, e))?;

        self.persist(&aggregate_id, 0, vec![event], correlation_id, None)
    }

    /// Handle a command against an existing aggregate and persist resulting events
    pub fn handle(&self, aggregate_id: A::Id, command: A::Command, correlation_id: Uuid) -> Result<i64> {
        self.handle_command(aggregate_id, command, correlation_id, None)
    }

    /// `handle`, recording `causation_id` (the message that triggered the
    /// command) on every resulting event
    pub fn handle_caused_by(
        &self,
        aggregate_id: A::Id,
        command: A::Command,
        correlation_id: Uuid,
        causation_id: Uuid,
    ) -> Result<i64> {
        self.handle_command(aggregate_id, command, correlation_id, Some(causation_id))
    }

    /// Rebuild the current state of an aggregate
    pub fn load(&self, aggregate_id: &A::Id) -> Result<A> {
        self.event_store.load_aggregate(aggregate_id)
    }

    fn handle_command(
        &self,
        aggregate_id: A::Id,
        command: A::Command,
        correlation_id: Uuid,
        causation_id: Option<Uuid>,
    ) -> Result<i64> {
        if !self.event_store.aggregate_exists(&aggregate_id)? {
            bail!("Aggregate does not exist: {}", aggregate_id);
        }

        // Load current aggregate state
        let aggregate: A = self.event_store.load_aggregate(&aggregate_id)?;
        let expected_version = aggregate.version();

        let domain_events = aggregate
            .handle_command(&command)
            .map_err(|e| self.rejected(&aggregate_id, e))?;

        if domain_events.is_empty() {
            return Ok(expected_version);
        }

        self.persist(&aggregate_id, expected_version, domain_events, correlation_id, causation_id)
    }

    fn persist(
        &self,
        aggregate_id: &A::Id,
        expected_version: i64,
        domain_events: Vec<A::Event>,
        correlation_id: Uuid,
        causation_id: Option<Uuid>,
    ) -> Result<i64> {
        let aggregate_type = self.event_store.aggregate_type_name();

        // Wrap in envelopes
        let mut envelopes = Vec::with_capacity(domain_events.len());
        let mut seq = expected_version;

        for domain_event in domain_events {
            seq += 1;
            if let Some(metrics) = &self.metrics {
                metrics.record_event(aggregate_type, domain_event.event_type());
            }
            let mut envelope = EventEnvelope::new(aggregate_id.clone(), seq, domain_event, correlation_id)
                .with_metadata("aggregate_type", aggregate_type);
            if let Some(causation_id) = causation_id {
                envelope = envelope.with_causation(causation_id);
            }
            envelopes.push(envelope);
        }

        self.event_store.append_events(aggregate_id, expected_version, envelopes)
    }

    fn rejected(&self, aggregate_id: &A::Id, error: A::Error) -> anyhow::Error {
        let aggregate_type = self.event_store.aggregate_type_name();
        tracing::warn!(
            aggregate_id = %aggregate_id,
            aggregate_type = %aggregate_type,
            error = %error,
            "Command rejected"
        );
        if let Some(metrics) = &self.metrics {
            metrics.record_rejection(aggregate_type);
        }
        anyhow::Error::new(error)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
