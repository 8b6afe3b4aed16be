use crate::shared::Repository;
use super::aggregate::Product;

/// Persistence contract for the Product entity
pub trait ProductRepository: Repository<Product> {}
