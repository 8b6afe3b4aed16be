use serde::{Deserialize, Serialize};

use super::errors::CustomerError;
use super::value_objects::Address;

// ============================================================================
// Customer Entity - Business Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CustomerData")]
pub struct Customer {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// New customers start inactive, without address and with no points
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Result<Self, CustomerError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    fn validate(&self) -> Result<(), CustomerError> {
        if self.id.trim().is_empty() {
            return Err(CustomerError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), CustomerError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CustomerError::EmptyName);
        }
        self.name = name;
        Ok(())
    }

    pub fn change_address(&mut self, address: Address) {
        self.address = Some(address);
    }

    pub fn activate(&mut self) -> Result<(), CustomerError> {
        if self.address.is_none() {
            return Err(CustomerError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}

#[derive(Deserialize)]
struct CustomerData {
    id: String,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl TryFrom<CustomerData> for Customer {
    type Error = CustomerError;

    fn try_from(data: CustomerData) -> Result<Self, Self::Error> {
        let mut customer = Customer::new(data.id, data.name)?;
        if let Some(address) = data.address {
            customer.change_address(address);
        }
        if data.active {
            customer.activate()?;
        }
        customer.add_reward_points(data.reward_points);
        Ok(customer)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_address() -> Address {
        Address::new("Street 1", 123, "13330-250", "São Paulo").unwrap()
    }

    #[test]
    fn test_customer_creation() {
        let customer = Customer::new("c1", "John").unwrap();

        assert_eq!(customer.id(), "c1");
        assert_eq!(customer.name(), "John");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn test_customer_with_empty_id_fails() {
        let result = Customer::new("", "John");
        assert_eq!(result.unwrap_err(), CustomerError::EmptyId);
    }

    #[test]
    fn test_customer_with_empty_name_fails() {
        let result = Customer::new("c1", "");
        assert_eq!(result.unwrap_err(), CustomerError::EmptyName);

        let result = Customer::new("c1", "   ");
        assert_eq!(result.unwrap_err(), CustomerError::EmptyName);
    }

    #[test]
    fn test_change_name() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn test_change_name_to_empty_keeps_old_name() {
        let mut customer = Customer::new("c1", "John").unwrap();
        let result = customer.change_name("");

        assert_eq!(result.unwrap_err(), CustomerError::EmptyName);
        assert_eq!(customer.name(), "John");
    }

    #[test]
    fn test_activate_requires_address() {
        let mut customer = Customer::new("c1", "John").unwrap();

        let result = customer.activate();
        assert_eq!(result.unwrap_err(), CustomerError::AddressRequired);
        assert!(!customer.is_active());

        customer.change_address(create_test_address());
        customer.activate().unwrap();
        assert!(customer.is_active());
    }

    #[test]
    fn test_deactivate() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.change_address(create_test_address());
        customer.activate().unwrap();

        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn test_change_address_replaces_previous() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.change_address(create_test_address());

        let new_address = Address::new("Avenue 2", 9, "99999", "Rio").unwrap();
        customer.change_address(new_address.clone());
        assert_eq!(customer.address(), Some(&new_address));
    }

    #[test]
    fn test_add_reward_points_accumulates() {
        let mut customer = Customer::new("c1", "John").unwrap();

        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), 10);

        customer.add_reward_points(10);
        assert_eq!(customer.reward_points(), 20);
    }

    #[test]
    fn test_add_reward_points_saturates() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.add_reward_points(u64::MAX);
        customer.add_reward_points(1);
        assert_eq!(customer.reward_points(), u64::MAX);
    }

    #[test]
    fn test_deserialize_runs_business_rules() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.change_address(create_test_address());
        customer.activate().unwrap();
        customer.add_reward_points(7);

        let json = serde_json::to_string(&customer).unwrap();
        let restored: Customer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, customer);

        let empty_name = serde_json::from_str::<Customer>(
            r#"{"id":"c1","name":"","address":null,"active":false,"reward_points":0}"#,
        );
        assert!(empty_name.is_err());

        let active_without_address = serde_json::from_str::<Customer>(
            r#"{"id":"c1","name":"John","address":null,"active":true,"reward_points":0}"#,
        );
        assert!(active_without_address
            .unwrap_err()
            .to_string()
            .contains("activate"));
    }
}
