//! # Order Service
//!
//! Sales order creation on top of the actor framework: an order is accepted
//! only if its customer exists and every requested product is in the catalog
//! with enough stock, and accepting it takes that stock in one step.
//!
//! - [`model`] - Customer, Product, Order and the request types
//! - [`customer_actor`], [`product_actor`], [`order_actor`] - one resource actor each
//! - [`clients`] - typed clients for those actors
//! - [`services`] - order assembly, the stock ledger and the creation workflow
//! - [`lifecycle`] - [`OrderSystem`](lifecycle::OrderSystem) and its configuration

pub mod clients;
pub mod customer_actor;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod product_actor;
pub mod services;
