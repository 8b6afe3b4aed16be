// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Each aggregate has its own subdirectory with:
// - Entities and value objects
// - Errors
// - Repository contract
// - Domain services / events where the aggregate has them
//
// This layer knows nothing about SQL; see src/infrastructure/.
//
// ============================================================================

pub mod customer;
pub mod order;
pub mod product;
