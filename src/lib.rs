// ============================================================================
// ddd_checkout - Domain-Driven Design checkout example
// ============================================================================
//
// - domain/         - Entities, value objects, events, repository contracts
// - infrastructure/ - SQLite repositories (sqlx)
// - shared/         - Generic event and repository abstractions
// - config, metrics - Ambient concerns
//
// ============================================================================

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod metrics;
pub mod shared;

pub use config::{AppConfig, ConfigError};
pub use metrics::Metrics;
pub use shared::{DomainEvent, EventHandler, Repository, RepositoryError};
