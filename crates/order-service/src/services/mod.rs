//! # Order Services
//!
//! Business logic that spans more than one actor.
//!
//! - [`assembler`] - pure validation of a request against a catalog snapshot
//! - [`stock_ledger`] - commits stock decrements for a whole order at once
//! - [`create_order`] - the order creation workflow tying everything together

pub mod assembler;
pub mod create_order;
pub mod stock_ledger;

pub use assembler::assemble;
pub use create_order::{CreateOrderService, WorkflowState};
pub use stock_ledger::StockLedger;
