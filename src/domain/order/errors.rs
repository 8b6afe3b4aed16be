// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Order id cannot be empty")]
    EmptyId,

    #[error("Order customer id cannot be empty")]
    EmptyCustomerId,

    #[error("Order items cannot be empty")]
    EmptyItems,

    #[error("Order item id cannot be empty")]
    EmptyItemId,

    #[error("Order item {item_id} must reference a product")]
    EmptyProductId { item_id: String },

    #[error("Order item {item_id} quantity must be greater than zero")]
    InvalidQuantity { item_id: String },

    #[error("Order item {item_id} has invalid price: {price}")]
    InvalidPrice { item_id: String, price: f64 },

    #[error("Order item {item_id} appears more than once")]
    DuplicateItemId { item_id: String },
}
