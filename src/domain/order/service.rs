use uuid::Uuid;

use crate::domain::customer::Customer;
use super::aggregate::Order;
use super::errors::OrderError;
use super::item::OrderItem;

// ============================================================================
// Order Domain Service
// ============================================================================
//
// Operations spanning more than one aggregate.
//
// ============================================================================

pub struct OrderService;

impl OrderService {
    /// Create an order for the customer and award half its total, rounded
    /// down, as reward points.
    pub fn place_order(customer: &mut Customer, items: Vec<OrderItem>) -> Result<Order, OrderError> {
        let order = Order::new(Uuid::new_v4().to_string(), customer.id(), items)?;

        let points = (order.total() / 2.0).floor() as u64;
        customer.add_reward_points(points);

        tracing::info!(
            order_id = %order.id(),
            customer_id = %customer.id(),
            item_count = order.items().len(),
            reward_points = points,
            "Placed order"
        );

        Ok(order)
    }

    /// Sum of the totals of all orders
    pub fn total(orders: &[Order]) -> f64 {
        orders.iter().map(Order::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, quantity: u32) -> OrderItem {
        OrderItem::new(id, "Item", price, "p1", quantity).unwrap()
    }

    #[test]
    fn test_place_order_awards_reward_points() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let order = OrderService::place_order(&mut customer, vec![item("i1", 10.0, 1)]).unwrap();

        assert_eq!(order.customer_id(), "c1");
        assert_eq!(order.total(), 10.0);
        assert_eq!(customer.reward_points(), 5);
        assert!(Uuid::parse_str(order.id()).is_ok());
    }

    #[test]
    fn test_place_order_rounds_points_down() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        OrderService::place_order(&mut customer, vec![item("i1", 3.0, 1)]).unwrap();

        assert_eq!(customer.reward_points(), 1);
    }

    #[test]
    fn test_place_order_without_items_awards_nothing() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();

        let result = OrderService::place_order(&mut customer, vec![]);

        assert_eq!(result.unwrap_err(), OrderError::EmptyItems);
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn test_total_of_all_orders() {
        let orders = vec![
            Order::new("o1", "c1", vec![item("i1", 100.0, 1)]).unwrap(),
            Order::new("o2", "c1", vec![item("i2", 200.0, 2)]).unwrap(),
        ];

        assert_eq!(OrderService::total(&orders), 500.0);
    }
}
