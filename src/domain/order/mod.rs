// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Child entities (OrderItem)
// - Errors (OrderError enum)
// - Aggregate (Order with its derived total)
// - Repository contract (OrderRepository)
// - Domain service (OrderService)
//
// ============================================================================

pub mod item;
pub mod errors;
pub mod aggregate;
pub mod repository;
pub mod service;

// Re-export for convenience
pub use item::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
pub use service::*;
