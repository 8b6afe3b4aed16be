use std::sync::Arc;

use crate::metrics::Metrics;
use crate::shared::{DomainEvent, EventHandler};
use super::events::CustomerAddressChanged;

// ============================================================================
// Customer Event Handlers
// ============================================================================

/// Logs a line whenever a customer's address changes
#[derive(Default)]
pub struct LogAddressChangedHandler {
    metrics: Option<Arc<Metrics>>,
}

impl LogAddressChangedHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Human-readable line emitted by `handle`
    pub fn message(event: &CustomerAddressChanged) -> String {
        let customer = &event.customer;
        let address = customer
            .address()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<none>".to_string());

        format!(
            "Customer address {}, {} changed to: {}",
            customer.id(),
            customer.name(),
            address
        )
    }
}

impl EventHandler<CustomerAddressChanged> for LogAddressChangedHandler {
    fn handle(&self, event: &CustomerAddressChanged) {
        tracing::info!(
            customer_id = %event.customer.id(),
            occurred_at = %event.occurred_at(),
            "{}",
            Self::message(event)
        );

        if let Some(metrics) = &self.metrics {
            metrics.record_event_handled(event.event_type());
        }
    }
}
