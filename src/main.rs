use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

use ddd_checkout::config::DEFAULT_LOG_FILTER;
use ddd_checkout::domain::customer::{
    Address, Customer, CustomerAddressChanged, LogAddressChangedHandler,
};
use ddd_checkout::domain::order::{OrderItem, OrderService};
use ddd_checkout::domain::product::{Product, ProductService};
use ddd_checkout::infrastructure::{
    create_pool, ensure_schema, SqlCustomerRepository, SqlOrderRepository, SqlProductRepository,
};
use ddd_checkout::{AppConfig, EventHandler, Metrics, Repository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with environment-based filtering
    // Can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting DDD checkout demo");

    // === 1. Configuration, database and metrics ===
    let config = AppConfig::from_env()?;
    let pool = create_pool(&config)
        .await
        .with_context(|| format!("connecting to {}", config.database_url))?;
    ensure_schema(&pool).await?;

    let metrics = Arc::new(Metrics::new()?);

    let customers = SqlCustomerRepository::new(pool.clone(), metrics.clone());
    let products = SqlProductRepository::new(pool.clone(), metrics.clone());
    let orders = SqlOrderRepository::new(pool.clone(), metrics.clone());

    // === 2. Customer and catalog ===
    let mut customer = Customer::new(Uuid::new_v4().to_string(), "Customer 1")?;
    customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1")?);
    customer.activate()?;
    customers.create(&customer).await?;

    let mut catalog = vec![
        Product::new(Uuid::new_v4().to_string(), "Keyboard", 49.90)?,
        Product::new(Uuid::new_v4().to_string(), "Mouse", 19.90)?,
    ];
    ProductService::increase_price(&mut catalog, 10.0)?;
    for product in &catalog {
        products.create(product).await?;
    }

    // === 3. Place an order, then add an item to it ===
    let keyboard = &catalog[0];
    let mouse = &catalog[1];

    let mut order = OrderService::place_order(
        &mut customer,
        vec![OrderItem::new(
            Uuid::new_v4().to_string(),
            keyboard.name(),
            keyboard.price(),
            keyboard.id(),
            1,
        )?],
    )?;
    orders.create(&order).await?;
    customers.update(&customer).await?;

    order.add_item(OrderItem::new(
        Uuid::new_v4().to_string(),
        mouse.name(),
        mouse.price(),
        mouse.id(),
        2,
    )?)?;
    orders.update(&order).await?;

    let stored = orders.find(order.id()).await?;
    tracing::info!(
        order_id = %stored.id(),
        item_count = stored.items().len(),
        total = stored.total(),
        "Order reloaded"
    );

    let all_orders = orders.find_all().await?;
    tracing::info!(
        order_count = all_orders.len(),
        grand_total = OrderService::total(&all_orders),
        "All orders loaded"
    );

    // === 4. Move the customer and notify ===
    customer.change_address(Address::new("Street 2", 2, "Zipcode 2", "City 2")?);
    customers.update(&customer).await?;

    let handler = LogAddressChangedHandler::new().with_metrics(metrics.clone());
    handler.handle(&CustomerAddressChanged::new(customer.clone()));

    let reloaded = customers.find(customer.id()).await?;
    tracing::info!(
        customer_id = %reloaded.id(),
        reward_points = reloaded.reward_points(),
        "Customer reloaded"
    );

    // === 5. Metrics ===
    println!("{}", metrics.render()?);

    tracing::info!("Demo complete");
    Ok(())
}
