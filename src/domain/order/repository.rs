use crate::shared::Repository;
use super::aggregate::Order;

/// Persistence contract for the Order aggregate
pub trait OrderRepository: Repository<Order> {}
