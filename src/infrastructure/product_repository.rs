// ============================================================================
// Product Persistence
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::product::{Product, ProductRepository};
use crate::metrics::Metrics;
use crate::shared::{Repository, RepositoryError};
use super::db::{corrupted, observe};

const AGGREGATE: &str = "Product";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    name: String,
    price: f64,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Product::new(row.id.as_str(), row.name, row.price).map_err(|e| corrupted(AGGREGATE, &row.id, e))
    }
}

pub struct SqlProductRepository {
    pool: SqlitePool,
    metrics: Arc<Metrics>,
}

impl SqlProductRepository {
    pub fn new(pool: SqlitePool, metrics: Arc<Metrics>) -> Self {
        Self { pool, metrics }
    }

    async fn insert(&self, product: &Product) -> Result<(), RepositoryError> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES (?, ?, ?)")
            .bind(product.id())
            .bind(product.name())
            .bind(product.price())
            .execute(&self.pool)
            .await?;

        tracing::info!(product_id = %product.id(), "Created product");
        Ok(())
    }

    async fn rewrite(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE products SET name = ?, price = ? WHERE id = ?")
            .bind(product.name())
            .bind(product.price())
            .bind(product.id())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            tracing::warn!(product_id = %product.id(), "Update of unknown product");
            return Err(RepositoryError::not_found(AGGREGATE, product.id()));
        }

        tracing::info!(product_id = %product.id(), "Updated product");
        Ok(())
    }

    async fn fetch(&self, id: &str) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| RepositoryError::not_found(AGGREGATE, id))?
            .try_into()
    }

    async fn fetch_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>("SELECT id, name, price FROM products")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

#[async_trait]
impl Repository<Product> for SqlProductRepository {
    async fn create(&self, product: &Product) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "create", self.insert(product)).await
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        observe(&self.metrics, AGGREGATE, "update", self.rewrite(product)).await
    }

    async fn find(&self, id: &str) -> Result<Product, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find", self.fetch(id)).await
    }

    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        observe(&self.metrics, AGGREGATE, "find_all", self.fetch_all()).await
    }
}

impl ProductRepository for SqlProductRepository {}
