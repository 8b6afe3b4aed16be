// ============================================================================
// Shared Kernel
// ============================================================================
//
// Generic building blocks used by every aggregate:
// - Domain events and synchronous event handlers
// - Repository contract and its error type
//
// No Customer/Order/Product code lives here.
//
// ============================================================================

pub mod event;
pub mod repository;

pub use event::{DomainEvent, EventHandler};
pub use repository::{Repository, RepositoryError};
