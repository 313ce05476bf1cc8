//! # Product Actor
//!
//! Owns the catalog: product prices and stock on hand.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`] type for type-safe error handling
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Stock changes
//!
//! Order creation never decrements stock through a per-product action.
//! The [`StockLedger`](crate::services::StockLedger) reads the requested
//! products in one batch, computes the new quantities and writes them back in
//! one versioned batch, so either every line is committed or none is.
//!
//! ## Usage
//!
//! ```rust
//! use order_service::product_actor;
//! use order_service::model::ProductCreate;
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let params = ProductCreate {
//!         name: "Widget".to_string(),
//!         price: Decimal::new(2999, 2),
//!         quantity: 100,
//!     };
//!     let id = client.create_product(params).await?;
//!
//!     assert_eq!(client.check_stock(id).await?, 100);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use actor_framework::ResourceActor;

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
