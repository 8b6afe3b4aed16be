// ============================================================================
// Customer Domain - Business Logic for the Customer Entity
// ============================================================================
//
// - Value objects (Address)
// - Errors (CustomerError enum)
// - Entity (Customer with its invariants)
// - Events (CustomerAddressChanged) and their handlers
// - Repository contract (CustomerRepository)
//
// ============================================================================

pub mod value_objects;
pub mod errors;
pub mod aggregate;
pub mod events;
pub mod handlers;
pub mod repository;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use aggregate::*;
pub use events::*;
pub use handlers::*;
pub use repository::*;
