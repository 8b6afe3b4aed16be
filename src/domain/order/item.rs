use serde::{Deserialize, Serialize};

use super::errors::OrderError;

// ============================================================================
// Order Item - child entity owned by an Order
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OrderItemData")]
pub struct OrderItem {
    id: String,
    name: String,
    price: f64,
    product_id: String,
    quantity: u32,
}

impl OrderItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        product_id: impl Into<String>,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };
        item.validate()?;
        Ok(item)
    }

    fn validate(&self) -> Result<(), OrderError> {
        if self.id.trim().is_empty() {
            return Err(OrderError::EmptyItemId);
        }
        if self.product_id.trim().is_empty() {
            return Err(OrderError::EmptyProductId { item_id: self.id.clone() });
        }
        if self.quantity == 0 {
            return Err(OrderError::InvalidQuantity { item_id: self.id.clone() });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(OrderError::InvalidPrice {
                item_id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// price × quantity
    pub fn total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Deserialize)]
struct OrderItemData {
    id: String,
    name: String,
    price: f64,
    product_id: String,
    quantity: u32,
}

impl TryFrom<OrderItemData> for OrderItem {
    type Error = OrderError;

    fn try_from(data: OrderItemData) -> Result<Self, Self::Error> {
        OrderItem::new(data.id, data.name, data.price, data.product_id, data.quantity)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_item_creation() {
        let item = OrderItem::new("i1", "Item 1", 12.5, "p1", 4).unwrap();

        assert_eq!(item.id(), "i1");
        assert_eq!(item.name(), "Item 1");
        assert_eq!(item.price(), 12.5);
        assert_eq!(item.product_id(), "p1");
        assert_eq!(item.quantity(), 4);
        assert_eq!(item.total(), 50.0);
    }

    #[test]
    fn test_zero_quantity_fails() {
        let result = OrderItem::new("i1", "Item 1", 10.0, "p1", 0);
        assert_eq!(
            result.unwrap_err(),
            OrderError::InvalidQuantity { item_id: "i1".to_string() }
        );
    }

    #[test]
    fn test_missing_ids_fail() {
        assert_eq!(
            OrderItem::new("", "Item", 1.0, "p1", 1).unwrap_err(),
            OrderError::EmptyItemId
        );
        assert_eq!(
            OrderItem::new("i1", "Item", 1.0, "", 1).unwrap_err(),
            OrderError::EmptyProductId { item_id: "i1".to_string() }
        );
    }

    #[test]
    fn test_negative_price_fails() {
        assert!(matches!(
            OrderItem::new("i1", "Item", -0.01, "p1", 1).unwrap_err(),
            OrderError::InvalidPrice { .. }
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let item: OrderItem = serde_json::from_str(
            r#"{"id":"i1","name":"Item","price":2.5,"product_id":"p1","quantity":2}"#,
        )
        .unwrap();
        assert_eq!(item.total(), 5.0);

        let negative = serde_json::from_str::<OrderItem>(
            r#"{"id":"i1","name":"Item","price":-1.0,"product_id":"p1","quantity":1}"#,
        );
        assert!(negative.is_err());
    }
}
