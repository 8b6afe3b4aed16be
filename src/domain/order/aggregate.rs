use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::item::OrderItem;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// The order owns its items; the customer and products are referenced by id
// only. The total is never stored on the aggregate, it is always derived
// from the items.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderData")]
pub struct Order {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
}

impl Order {
    pub fn new(
        id: impl Into<String>,
        customer_id: impl Into<String>,
        items: Vec<OrderItem>,
    ) -> Result<Self, OrderError> {
        let order = Self {
            id: id.into(),
            customer_id: customer_id.into(),
            items,
        };
        order.validate()?;
        Ok(order)
    }

    /// Validate business rules
    fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::EmptyId);
        }
        if self.customer_id.trim().is_empty() {
            return Err(OrderError::EmptyCustomerId);
        }
        if self.items.is_empty() {
            return Err(OrderError::EmptyItems);
        }
        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id()) {
                return Err(OrderError::DuplicateItemId {
                    item_id: item.id().to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Item ids are unique within an order
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        if self.items.iter().any(|existing| existing.id() == item.id()) {
            return Err(OrderError::DuplicateItemId {
                item_id: item.id().to_string(),
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Sum of price × quantity over all items
    pub fn total(&self) -> f64 {
        self.items.iter().map(OrderItem::total).sum()
    }
}

/// Wire shape; deserialized orders go through `Order::new`
#[derive(Deserialize)]
struct OrderData {
    id: String,
    customer_id: String,
    items: Vec<OrderItem>,
}

impl TryFrom<OrderData> for Order {
    type Error = OrderError;

    fn try_from(data: OrderData) -> Result<Self, Self::Error> {
        Order::new(data.id, data.customer_id, data.items)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
