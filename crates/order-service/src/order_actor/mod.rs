//! # Order Actor
//!
//! Stores orders. Orders are assembled and validated by the
//! [`CreateOrderService`](crate::services::CreateOrderService) before they
//! reach this actor. They arrive pending and become visible through
//! [`OrderClient`] only after [`OrderAction::Confirm`]; their lines never change.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`]
//! - [`actions`] - [`OrderAction`]
//! - [`error`] - [`OrderError`], which is also the error of the whole
//!   order creation workflow
//! - [`new()`] - Factory function that creates the actor and client

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::model::Order;
use actor_framework::ResourceActor;

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
