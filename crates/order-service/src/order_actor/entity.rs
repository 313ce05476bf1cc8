//! [`ActorEntity`] implementation for [`Order`].

use super::actions::OrderAction;
use super::error::OrderError;
use crate::model::{order_total, Order, OrderCreate, OrderId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = (); // Lines are immutable
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = ();
    type Error = OrderError;

    fn id(&self) -> &OrderId {
        &self.id
    }

    /// Creates a new Order from assembled line items.
    ///
    /// Rejects an order without lines, with a zero-quantity line or whose
    /// total overflows, so a malformed aggregate can never be stored.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.products.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        if let Some(line) = params.products.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::InvalidQuantity(line.product_id.clone()));
        }
        if order_total(&params.products).is_none() {
            return Err(OrderError::TotalOverflow);
        }
        Ok(Self::new(id, params.customer.id, params.products))
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), OrderError> {
        Err(OrderError::ValidationError(format!(
            "{} cannot be modified",
            self.id
        )))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<Order, OrderError> {
        match action {
            OrderAction::Confirm => {
                self.confirm();
                Ok(self.clone())
            }
        }
    }
}
