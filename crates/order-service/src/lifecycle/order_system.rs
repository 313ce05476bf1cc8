use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::lifecycle::SystemConfig;
use crate::model::{Order, OrderId, OrderRequest};
use crate::order_actor::OrderError;
use crate::services::CreateOrderService;
use actor_framework::ActorClient;
use tracing::{error, info};

/// The main runtime orchestrator for the actor-based order system.
///
/// `OrderSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping all actors in the system
/// - **Dependency Wiring**: Handing the clients to the order creation service
///
/// # Example
///
/// ```ignore
/// let system = OrderSystem::new();
///
/// let customer_id = system.customer_client.create_customer(customer).await?;
/// let product_id = system.product_client.create_product(product).await?;
/// let order = system
///     .create_order(OrderRequest {
///         customer_id,
///         products: vec![ProductQuantity::new(product_id, 3)],
///     })
///     .await?;
///
/// system.shutdown().await?;
/// ```
pub struct OrderSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    pub order_service: CreateOrderService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Default for OrderSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderSystem {
    /// Starts the system with [`SystemConfig::default`]. Must be called
    /// inside a Tokio runtime.
    pub fn new() -> Self {
        Self::with_config(&SystemConfig::default())
    }

    /// Starts every actor and wires the order service.
    pub fn with_config(config: &SystemConfig) -> Self {
        let capacity = config.mailbox_capacity.max(1);

        // 1. Create actors (no dependencies)
        let (customer_actor, customer_client) = crate::customer_actor::new(capacity);
        let (product_actor, product_client) = crate::product_actor::new(capacity);
        let (order_actor, order_client) = crate::order_actor::new(capacity);

        // 2. Start actors, none of them needs a context
        let handles = vec![
            tokio::spawn(customer_actor.run(())),
            tokio::spawn(product_actor.run(())),
            tokio::spawn(order_actor.run(())),
        ];

        // 3. Wire the workflow
        let order_service = CreateOrderService::new(
            customer_client.clone(),
            product_client.clone(),
            order_client.clone(),
            config,
        );

        info!(
            mailbox_capacity = capacity,
            stock_update_attempts = config.stock_update_attempts,
            "Order system started"
        );

        Self {
            customer_client,
            product_client,
            order_client,
            order_service,
            handles,
        }
    }

    /// Validates and stores an order and takes its stock. See
    /// [`CreateOrderService::execute`].
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        self.order_service.execute(request).await
    }

    pub async fn find_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.order_client.find_order(id).await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.order_client.list().await
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' channels; each actor then
    /// leaves its loop. Returns an error if any actor task panicked.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // The service holds clones of every client, so it goes first
        drop(self.order_service);
        drop(self.order_client);
        drop(self.customer_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
