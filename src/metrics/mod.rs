use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides counters for:
// - Events recorded per aggregate type
// - Commands rejected by business rules
// - Payment outcomes (PAID / FAILED / rejected)
//
// Metrics live in a private registry; `render()` produces the Prometheus
// text exposition format for whoever wants to publish it.
// ============================================================================

/// Central metrics registry for the domain layer
pub struct Metrics {
    registry: Registry,

    pub events_recorded: IntCounterVec,
    pub commands_rejected: IntCounterVec,
    pub payments_processed: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let events_recorded = IntCounterVec::new(
            Opts::new("events_recorded_total", "Total domain events appended to the event store"),
            &["aggregate", "event_type"],
        )?;
        registry.register(Box::new(events_recorded.clone()))?;

        let commands_rejected = IntCounterVec::new(
            Opts::new("commands_rejected_total", "Total commands rejected by business rules"),
            &["aggregate"],
        )?;
        registry.register(Box::new(commands_rejected.clone()))?;

        let payments_processed = IntCounterVec::new(
            Opts::new("payments_processed_total", "Total payment evaluations by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(payments_processed.clone()))?;

        Ok(Self {
            registry,
            events_recorded,
            commands_rejected,
            payments_processed,
        })
    }

    /// Helper to record an appended event
    pub fn record_event(&self, aggregate: &str, event_type: &str) {
        self.events_recorded.with_label_values(&[aggregate, event_type]).inc();
    }

    /// Helper to record a rejected command
    pub fn record_rejection(&self, aggregate: &str) {
        self.commands_rejected.with_label_values(&[aggregate]).inc();
    }

    /// Helper to record a payment outcome ("PAID", "FAILED" or "REJECTED")
    pub fn record_payment(&self, outcome: &str) {
        self.payments_processed.with_label_values(&[outcome]).inc();
    }

    /// Encode every registered metric in the text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.record_event("Product", "ProductRegistered");
        assert!(metrics.render().unwrap().contains("events_recorded_total"));
    }

    #[test]
    fn test_record_event() {
        let metrics = Metrics::new().unwrap();
        metrics.record_event("Product", "StockIncreased");
        metrics.record_event("Product", "StockIncreased");
        metrics.record_event("Product", "DiscountApplied");

        let increased = metrics.events_recorded.with_label_values(&["Product", "StockIncreased"]);
        assert_eq!(increased.get(), 2);
    }

    #[test]
    fn test_record_rejection_and_payment() {
        let metrics = Metrics::new().unwrap();
        metrics.record_rejection("LedgerOrder");
        metrics.record_payment("PAID");
        metrics.record_payment("FAILED");
        metrics.record_payment("PAID");

        assert_eq!(metrics.commands_rejected.with_label_values(&["LedgerOrder"]).get(), 1);
        assert_eq!(metrics.payments_processed.with_label_values(&["PAID"]).get(), 2);
        assert_eq!(metrics.payments_processed.with_label_values(&["FAILED"]).get(), 1);
    }

    #[test]
    fn test_render_text_format() {
        let metrics = Metrics::new().unwrap();
        metrics.record_payment("PAID");

        let text = metrics.render().unwrap();
        assert!(text.contains("payments_processed_total"));
        assert!(text.contains("outcome=\"PAID\""));
    }
}
