//! Error types for the Order actor and the order creation workflow.

use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, OrderId, ProductId};
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur while creating or reading orders.
///
/// Business-rule failures (`CustomerNotFound` through `DuplicateProduct`) are
/// final. Only version conflicts on stock are retried, and
/// `ConcurrencyConflict` reports that the retries ran out.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Order contains no products")]
    EmptyOrder,

    /// A requested quantity of zero.
    #[error("Invalid quantity for {0}")]
    InvalidQuantity(ProductId),

    /// The same product was requested on more than one line.
    #[error("Duplicate product in order: {0}")]
    DuplicateProduct(ProductId),

    /// The order total does not fit in a decimal amount.
    #[error("Order total is too large")]
    TotalOverflow,

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Stock kept changing concurrently, gave up after {attempts} attempts")]
    ConcurrencyConflict { attempts: usize },

    /// Stock could not be committed and the stored order could not be removed either.
    #[error("Rollback of {order_id} failed: {reason}")]
    RollbackFailed { order_id: OrderId, reason: String },

    /// A catalog failure with no order-level meaning, e.g. an invalid price.
    #[error("Catalog error: {0}")]
    Catalog(ProductError),

    #[error("Order validation error: {0}")]
    ValidationError(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<ProductError> for OrderError {
    fn from(e: ProductError) -> Self {
        match e {
            ProductError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::Catalog(other),
        }
    }
}

impl From<CustomerError> for OrderError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::ActorCommunicationError(msg) => OrderError::ActorCommunicationError(msg),
            other => OrderError::ValidationError(other.to_string()),
        }
    }
}
