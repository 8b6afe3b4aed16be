// ============================================================================
// Customer Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CustomerError {
    #[error("Customer id cannot be empty")]
    EmptyId,

    #[error("Customer name cannot be empty")]
    EmptyName,

    #[error("Address is mandatory to activate a customer")]
    AddressRequired,

    #[error("Invalid address: {0} cannot be empty")]
    InvalidAddress(&'static str),
}
