// ============================================================================
// Database Setup and Shared SQL Helpers
// ============================================================================
//
// Connection pool, schema and helpers shared by the SQL repositories.
//
// Tables:
//   - customers    Customer entity with its address columns inlined
//   - products     Product catalog
//   - orders       Order header, references customers
//   - order_items  Order lines, reference orders and products
//
// ============================================================================

use std::future::Future;
use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::metrics::{Metrics, OUTCOME_ERROR, OUTCOME_NOT_FOUND, OUTCOME_OK};
use crate::shared::RepositoryError;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS customers (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        street TEXT,
        number INTEGER,
        zipcode TEXT,
        city TEXT,
        active INTEGER NOT NULL,
        reward_points INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS products (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        price REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY NOT NULL,
        customer_id TEXT NOT NULL REFERENCES customers (id),
        total REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS order_items (
        id TEXT PRIMARY KEY NOT NULL,
        order_id TEXT NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        product_id TEXT NOT NULL REFERENCES products (id),
        name TEXT NOT NULL,
        price REAL NOT NULL,
        quantity INTEGER NOT NULL,
        position INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items (order_id)",
];

/// Create a SQLite connection pool with foreign keys enforced.
///
/// In-memory databases get a single connection that is never recycled,
/// otherwise each new connection would open an empty database.
pub async fn create_pool(config: &AppConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(config.effective_max_connections())
        .acquire_timeout(Duration::from_secs(10));

    if config.is_in_memory() {
        pool_options = pool_options
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    let pool = pool_options.connect_with(options).await?;

    tracing::info!(
        in_memory = config.is_in_memory(),
        max_connections = config.effective_max_connections(),
        "Connected to SQLite"
    );

    Ok(pool)
}

/// Create every table if it does not exist yet
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    tracing::debug!(statements = SCHEMA.len(), "Schema ensured");
    Ok(())
}

/// Run one repository operation and record its outcome and latency
pub(crate) async fn observe<T, F>(
    metrics: &Metrics,
    aggregate: &str,
    operation: &str,
    operation_future: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    let started = Instant::now();
    let result = operation_future.await;

    let outcome = match &result {
        Ok(_) => OUTCOME_OK,
        Err(e) if e.is_not_found() => OUTCOME_NOT_FOUND,
        Err(e) => {
            tracing::error!(aggregate, operation, error = %e, "Repository operation failed");
            OUTCOME_ERROR
        }
    };

    metrics.record_repository_operation(
        aggregate,
        operation,
        outcome,
        started.elapsed().as_secs_f64(),
    );

    result
}

/// Read an INTEGER column into a `u32`
pub(crate) fn column_to_u32(column: &str, value: i64) -> Result<u32, RepositoryError> {
    u32::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("{column} out of range: {value}")))
}

/// Read an INTEGER column into a `u64`
pub(crate) fn column_to_u64(column: &str, value: i64) -> Result<u64, RepositoryError> {
    u64::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("{column} out of range: {value}")))
}

/// Write a `u64` into an INTEGER column
pub(crate) fn u64_to_column(column: &str, value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value).map_err(|_| {
        RepositoryError::DataCorruption(format!("{column} does not fit in storage: {value}"))
    })
}

/// A row that no longer satisfies a domain rule
pub(crate) fn corrupted(entity: &str, id: &str, error: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::DataCorruption(format!("{entity} {id}: {error}"))
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = create_pool(&AppConfig::default()).await.unwrap();
    ensure_schema(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let pool = test_pool().await;
        ensure_schema(&pool).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();

        let names: Vec<_> = tables.into_iter().map(|(name,)| name).collect();
        assert_eq!(names, vec!["customers", "order_items", "orders", "products"]);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = test_pool().await;

        let result = sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ('o1', 'missing', 1.0)")
            .execute(&pool)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_observe_records_outcomes() {
        let metrics = Metrics::new().unwrap();

        let ok = observe(&metrics, "Order", "find", async { Ok::<u8, RepositoryError>(1) }).await;
        let missing = observe(&metrics, "Order", "find", async {
            Err::<u8, _>(RepositoryError::not_found("Order", "x"))
        })
        .await;

        assert!(ok.is_ok());
        assert!(missing.unwrap_err().is_not_found());
        assert_eq!(metrics.repository_operations("Order", "find", OUTCOME_OK), 1);
        assert_eq!(metrics.repository_operations("Order", "find", OUTCOME_NOT_FOUND), 1);
    }

    #[test]
    fn test_integer_conversions() {
        assert_eq!(column_to_u32("quantity", 3).unwrap(), 3);
        assert!(column_to_u32("quantity", -1).is_err());
        assert!(column_to_u64("reward_points", -5).is_err());
        assert!(u64_to_column("reward_points", u64::MAX).is_err());
        assert_eq!(u64_to_column("reward_points", 7).unwrap(), 7);
    }
}
