//! # Actor Framework
//!
//! Building blocks for type-safe resource actors on Tokio: one actor task per
//! resource type, owning its entities, reached only through typed clients.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the domain type and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and the versioned store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests
//!
//! ## Operations
//!
//! Every actor answers the same requests ([`ResourceRequest`]):
//!
//! - **CRUD**: `create`, `get`, `update`, `delete`
//! - **Action**: a resource-specific operation on one entity
//! - **Batch**: `find_many` (one round trip, unknown ids skipped), `save_many`
//!   (all-or-nothing write checked against [`Versioned`] versions) and `list`
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task and handles one message at a time
//! - A batch request is one message, so it reads or writes a consistent snapshot
//! - Writes that span several messages (read, compute, write back) use
//!   `find_many` + `save_many`: a concurrent change in between surfaces as
//!   [`FrameworkError::Conflict`] and the caller re-reads and retries
//!
//! ## Context Injection Pattern
//!
//! Dependencies are handed to `run()`, not `new()`, so actors can be created
//! first and wired afterwards:
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Account { id: u32 }
//! #[derive(Debug)] struct AccountCreate;
//! #[derive(Debug)] struct AccountUpdate;
//! #[derive(Debug)] enum AccountAction {}
//! #[derive(Debug, thiserror::Error)] #[error("account error")] struct AccountError;
//!
//! #[async_trait]
//! impl ActorEntity for Account {
//!     type Id = u32; type Create = AccountCreate; type Update = AccountUpdate;
//!     type Action = AccountAction; type ActionResult = (); type Context = (); type Error = AccountError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: AccountCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: AccountUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: AccountAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[derive(Clone, Debug)] struct Invoice { id: u32 }
//! #[derive(Debug)] struct InvoiceCreate;
//! #[derive(Debug)] struct InvoiceUpdate;
//! #[derive(Debug)] enum InvoiceAction {}
//! #[derive(Debug, thiserror::Error)] #[error("invoice error")] struct InvoiceError;
//!
//! #[async_trait]
//! impl ActorEntity for Invoice {
//!     type Id = u32; type Create = InvoiceCreate; type Update = InvoiceUpdate;
//!     type Action = InvoiceAction; type ActionResult = ();
//!     // Invoices can look up accounts while handling their hooks
//!     type Context = ResourceClient<Account>;
//!     type Error = InvoiceError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: InvoiceCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: InvoiceUpdate, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: InvoiceAction, _: &Self::Context) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (account_actor, account_client) = ResourceActor::<Account>::new(10);
//!     let (invoice_actor, invoice_client) = ResourceActor::<Invoice>::new(10);
//!
//!     tokio::spawn(account_actor.run(()));
//!     tokio::spawn(invoice_actor.run(account_client));
//!
//!     let _ = invoice_client.create(InvoiceCreate).await;
//! }
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from queued expectations instead of a
//! real store, and [`mock::create_mock_client`] hands the raw request channel to
//! the test. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;
pub mod versioned;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use versioned::Versioned;
