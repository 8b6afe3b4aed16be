use crate::shared::Repository;
use super::aggregate::Customer;

/// Persistence contract for the Customer entity
pub trait CustomerRepository: Repository<Customer> {}
