use chrono::{DateTime, Utc};

use crate::shared::DomainEvent;
use super::aggregate::Customer;

// ============================================================================
// Customer Domain Events
// ============================================================================

/// Customer Address Changed - carries the customer after the change
#[derive(Debug, Clone)]
pub struct CustomerAddressChanged {
    pub customer: Customer,
    pub occurred_at: DateTime<Utc>,
}

impl CustomerAddressChanged {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            occurred_at: Utc::now(),
        }
    }
}

impl DomainEvent for CustomerAddressChanged {
    fn event_type(&self) -> &'static str {
        "CustomerAddressChanged"
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
