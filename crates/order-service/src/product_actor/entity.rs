//! [`ActorEntity`] implementation for [`Product`].
//!
//! Prices are validated on create and update; stock can be set to any
//! non-negative level through [`ProductUpdate`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::product::normalize_price;
use crate::model::{is_valid_price, Product, ProductCreate, ProductId, ProductUpdate};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        if !is_valid_price(params.price) {
            return Err(ProductError::InvalidPrice(params.price));
        }
        Ok(Self::new(id, params.name, params.price, params.quantity))
    }

    /// Handles updates to the Product entity.
    ///
    /// # Fields Updated
    /// - `price`: Product price, rejected if invalid
    /// - `quantity`: Available stock quantity
    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), ProductError> {
        if let Some(price) = update.price {
            if !is_valid_price(price) {
                return Err(ProductError::InvalidPrice(price));
            }
            self.price = normalize_price(price);
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.quantity)),
        }
    }
}
