use async_trait::async_trait;

// ============================================================================
// Repository Contract
// ============================================================================
//
// One repository per aggregate root. Implementations translate the aggregate
// to and from persisted rows; the domain never sees SQL.
//
// ============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx, propagated unchanged.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No row matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A stored row no longer satisfies the domain rules.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Persistence operations shared by every aggregate repository
#[async_trait]
pub trait Repository<T>: Send + Sync
where
    T: Send + Sync,
{
    /// Persist a new aggregate
    async fn create(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Rewrite an existing aggregate; fails with `NotFound` if absent
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Load one aggregate by id; fails with `NotFound` if absent
    async fn find(&self, id: &str) -> Result<T, RepositoryError>;

    /// Load every aggregate. Order is store-defined.
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;
}
