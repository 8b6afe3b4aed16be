// ============================================================================
// Customer Persistence
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::customer::{Address, Customer, CustomerRepository};
use crate::metrics::Metrics;
use crate::shared::{Repository, RepositoryError};
use super::db::{column_to_u32, column_to_u64, corrupted, observe, u64_to_column};

const AGGREGATE: &str = "Customer";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: String,
    name: String,
    street: Option<String>,
    number: Option<i64>,
    zipcode: Option<String>,
    city: Option<String>,
    active: bool,
    reward_points: i64,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let mut customer =
            Customer::new(row.id.as_str(), row.name).map_err(|e| corrupted(AGGREGATE, &row.id, e))?;

        match (row.street, row.number, row.zipcode, row.city) {
            (Some(street), Some(number), Some(zipcode), Some(city)) => {
                let number = column_to_u32("number", number)?;
                let address = Address::new(street, number, zipcode, city)
                    .map_err(|e| corrupted(AGGREGATE, &row.id, e))?;
                customer.change_address(address);
            }
            (None, None, None, None) => {}
            _ => return Err(corrupted(AGGREGATE, &row.id, "partial address")),
        }

        if row.active {
            customer
                .activate()
                .map_err(|e| corrupted(AGGREGATE, &row.id, e))?;
        }

        customer.add_reward_points(column_to_u64("reward_points", row.reward_points)?);

        Ok(customer)
    }
}

// =============================================================================
// Repository
// =============================================================================

pub struct SqlCustomerRepository {
    pool: SqlitePool,
    metrics: Arc<Metrics>,
}

impl SqlCustomerRepository {
    pub fn new(pool: SqlitePool, metrics: Arc<Metrics>) -> Self {
        Self { pool, metrics }
    }

    async fn insert(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let address = customer.address();

        sqlx::query(
            "INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(customer.id())
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(|a| i64::from(a.number())))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(u64_to_column("reward_points", customer.reward_points())?)
        .execute(&self.pool)
        .await?;

        tracing::info!(customer_id = %customer.id(), "Created customer");
        Ok(())
    }

    async fn rewrite(&self, customer: &Customer) -> Result<(), RepositoryError> {
        let address = customer.address();

        let result = sqlx::query(
            "UPDATE customers
             SET name = ?, street = ?, number = ?, zipcode = ?, city = ?, active = ?, reward_points = ?
             WHERE id = ?",
        )
        .bind(customer.name())
        .bind(address.map(Address::street))
        .bind(address.map(|a| i64::from(a.number())))
        .bind(address.map(Address::zip))
        .bind(address.map(Address::city))
        .bind(customer.is_active())
        .bind(u64_to_column("reward_points", customer.reward_points())?)
        .bind(customer.id())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(customer_id = %customer.id(), "Update of unknown customer");
            return Err(RepositoryError::not_found(AGGREGATE, customer.id()));
        }

        tracing::info!(customer_id = %customer.id(), "Updated customer");
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, street, number, zipcode, city, active, reward_points
             FROM customers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| RepositoryError::not_found(AGGREGATE, id))?;

        tracing::debug!(customer_id = %id, "Loaded customer");
        row.try_into()
    }

    async fn fetch_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, street, number, zipcode, city, active, reward_points FROM customers",
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!(count = rows.len(), "Loaded customers");
        rows.into_iter().map(Customer::try_from).collect()
    }
}

#[async_trait]
impl Repository<Customer> for SqlCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "create", self.insert(customer)).await
    }

    async fn update(&self, customer: &Customer) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "update", self.rewrite(customer)).await
    }

    async fn find(&self, id: &str) -> Result<Customer, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find", self.fetch(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Customer>, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find_all", self.fetch_all()).await
    }
}

impl CustomerRepository for SqlCustomerRepository {}

// ============================================================================
// Unit Tests
// ============================================================================
