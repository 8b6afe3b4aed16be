use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

// ============================================================================
// Metrics Module - Prometheus metrics for observability
// ============================================================================
//
// Provides metrics for:
// - Repository operations (count by outcome, latency)
// - Domain events handled
//
// The registry is rendered in the text exposition format by `render`.
// ============================================================================

/// Outcome label values for repository operations
pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_NOT_FOUND: &str = "not_found";
pub const OUTCOME_ERROR: &str = "error";

/// Central metrics registry for the application
pub struct Metrics {
    registry: Registry,

    // Repository Metrics
    pub repository_operations: IntCounterVec,
    pub repository_duration: HistogramVec,

    // Event Metrics
    pub events_handled_total: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Repository Metrics
        let repository_operations = IntCounterVec::new(
            Opts::new("repository_operations_total", "Total repository operations"),
            &["aggregate", "operation", "outcome"],
        )?;
        registry.register(Box::new(repository_operations.clone()))?;

        let repository_duration = HistogramVec::new(
            HistogramOpts::new(
                "repository_operation_duration_seconds",
                "Repository operation duration",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
            &["aggregate", "operation"],
        )?;
        registry.register(Box::new(repository_duration.clone()))?;

        // Event Metrics
        let events_handled_total = IntCounterVec::new(
            Opts::new("domain_events_handled_total", "Total domain events handled"),
            &["event_type"],
        )?;
        registry.register(Box::new(events_handled_total.clone()))?;

        Ok(Self {
            registry,
            repository_operations,
            repository_duration,
            events_handled_total,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record one repository call
    pub fn record_repository_operation(
        &self,
        aggregate: &str,
        operation: &str,
        outcome: &str,
        duration_secs: f64,
    ) {
        self.repository_operations
            .with_label_values(&[aggregate, operation, outcome])
            .inc();
        self.repository_duration
            .with_label_values(&[aggregate, operation])
            .observe(duration_secs);
    }

    pub fn repository_operations(&self, aggregate: &str, operation: &str, outcome: &str) -> u64 {
        self.repository_operations
            .with_label_values(&[aggregate, operation, outcome])
            .get()
    }

    /// Helper to record a handled domain event
    pub fn record_event_handled(&self, event_type: &str) {
        self.events_handled_total.with_label_values(&[event_type]).inc();
    }

    pub fn events_handled(&self, event_type: &str) -> u64 {
        self.events_handled_total.with_label_values(&[event_type]).get()
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
