// ============================================================================
// Product Domain - Business Logic for the Product Entity
// ============================================================================

pub mod errors;
pub mod aggregate;
pub mod repository;
pub mod service;

// Re-export for convenience
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
pub use service::*;
