// ============================================================================
// Infrastructure Layer - SQL Persistence
// ============================================================================
//
// Repository implementations backed by SQLite through sqlx. Each repository
// maps its aggregate to rows with private `FromRow` structs and rebuilds the
// aggregate through the domain constructors on read, so stored data is
// re-validated.
//
// ============================================================================

pub mod db;
pub mod customer_repository;
pub mod order_repository;
pub mod product_repository;

pub use db::{create_pool, ensure_schema};
pub use customer_repository::SqlCustomerRepository;
pub use order_repository::SqlOrderRepository;
pub use product_repository::SqlProductRepository;
