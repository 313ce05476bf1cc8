//! Domain data structures managed by the resource actors.
//!
//! Each entity lives in one actor; see the `*_actor` modules for their
//! [`ActorEntity`](actor_framework::ActorEntity) implementations.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::*;
pub use order::*;
pub use product::*;
