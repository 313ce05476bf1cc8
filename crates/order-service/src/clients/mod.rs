//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).

pub mod customer_client;
pub mod order_client;
pub mod product_client;

pub use customer_client::*;
pub use order_client::*;
pub use product_client::*;
