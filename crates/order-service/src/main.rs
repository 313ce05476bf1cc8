//! # Order Service Demo
//!
//! Starts the [`OrderSystem`], registers a customer and a product, then places
//! one order that fits the stock and one that does not.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p order-service   # workflow transitions included
//! ```

use actor_framework::tracing::setup_tracing;
use order_service::lifecycle::{OrderSystem, SystemConfig};
use order_service::model::{CustomerCreate, OrderRequest, ProductCreate, ProductQuantity};
use rust_decimal::Decimal;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing(&SystemConfig::log_filter_from_env());
    let config = SystemConfig::from_env();

    info!(?config, "Starting order system");
    let system = OrderSystem::with_config(&config);

    let customer_id = system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%customer_id, "Customer created");

    let product_id = system
        .product_client
        .create_product(ProductCreate {
            name: "Widget".to_string(),
            price: Decimal::new(1000, 2),
            quantity: 5,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(%product_id, "Product created");

    for quantity in [3, 6] {
        let request = OrderRequest {
            customer_id: customer_id.clone(),
            products: vec![ProductQuantity::new(product_id.clone(), quantity)],
        };

        let span = tracing::info_span!("order_processing", quantity);
        match system.create_order(request).instrument(span).await {
            Ok(order) => info!(
                order_id = %order.id,
                total = order.total().map(tracing::field::display),
                "Order placed"
            ),
            Err(e) => error!(error = %e, "Order failed"),
        }

        let stock = system
            .product_client
            .check_stock(product_id.clone())
            .await
            .map_err(|e| e.to_string())?;
        info!(%product_id, stock, "Stock level");
    }

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
