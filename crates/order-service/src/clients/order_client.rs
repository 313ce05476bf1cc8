//! # Order Client
//!
//! Provides a high‑level API for interacting with the `Order` actor.
//! It wraps a `ResourceClient<Order>`; validation and stock handling live in
//! the [`CreateOrderService`](crate::services::CreateOrderService).
//!
//! Orders are stored as pending and only become visible through `get`, `list`
//! and [`OrderClient::find_order`] once [`OrderClient::confirm_order`] has run.
use crate::model::{Order, OrderCreate, OrderId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    /// Stores an assembled order and returns it as persisted, still pending.
    #[instrument(
        skip(self, params),
        fields(customer_id = %params.customer.id, lines = params.products.len())
    )]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        self.inner
            .get(id.clone())
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
    }

    /// Makes a pending order visible to readers.
    #[instrument(skip(self))]
    pub async fn confirm_order(&self, id: OrderId) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Confirm)
            .await
            .map_err(Self::map_error)
    }

    /// Fetches a confirmed order, failing with [`OrderError::OrderNotFound`] if there is none.
    #[instrument(skip(self))]
    pub async fn find_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id.clone())
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(id.to_string()))
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::OrderNotFound(id),
            other => match other.entity_error::<OrderError>() {
                Some(inner) => inner.clone(),
                None => OrderError::ActorCommunicationError(other.to_string()),
            },
        }
    }

    #[instrument(skip(self))]
    async fn get(&self, id: OrderId) -> Result<Option<Order>, OrderError> {
        debug!("Sending request");
        let order = self.inner.get(id).await.map_err(Self::map_error)?;
        Ok(order.filter(Order::is_confirmed))
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let orders = self.inner.list().await.map_err(Self::map_error)?;
        Ok(orders.into_iter().filter(Order::is_confirmed).collect())
    }
}
