//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors of the order system.
//!
//! ## The OrderSystem Pattern
//!
//! [`OrderSystem::with_config`] is the composition root:
//!
//! 1. **Create** one actor per resource (customer, product, order). Nothing
//!    depends on anything yet.
//! 2. **Start** each actor in its own Tokio task. None of them needs a
//!    context, so every `run` gets `()`.
//! 3. **Wire** the [`CreateOrderService`](crate::services::CreateOrderService)
//!    with clones of all three clients.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, including the clones held by the service
//! 2. **Actors detect closure**: `receiver.recv()` returns `None`
//! 3. **Actors clean up** and log their final store size
//! 4. **Await completion** of every actor task
//!
//! The dependency graph is acyclic (only the service holds other clients), so
//! channel closure is enough to stop everything.
//!
//! ## Configuration
//!
//! [`SystemConfig`] carries the tunables, from defaults or from the
//! environment. See [`config`].

pub mod config;
pub mod order_system;

pub use config::*;
pub use order_system::*;
