/// A customer order and its line items.
///
/// # Actor Framework
/// Managed by the [`order_actor`](crate::order_actor). The order creation
/// workflow stores an order as [`OrderStatus::Pending`] and confirms it once
/// its stock is committed, or deletes it if the stock could not be taken.
/// Readers only ever see confirmed orders.
use crate::model::{Customer, CustomerId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One product of an order.
///
/// `price` is a snapshot of the catalog price taken when the order was
/// assembled. Later price changes do not reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub price: Decimal,
    pub quantity: u32,
}

impl OrderLineItem {
    /// `price * quantity`, or `None` if it does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of the line totals, or `None` on overflow.
pub fn order_total(lines: &[OrderLineItem]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Stored, but its stock is not committed yet. Hidden from readers.
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub products: Vec<OrderLineItem>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new pending Order stamped with the current time.
    pub fn new(id: OrderId, customer_id: CustomerId, products: Vec<OrderLineItem>) -> Self {
        let now = Utc::now();
        Self {
            id,
            customer_id,
            products,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == OrderStatus::Confirmed
    }

    /// Marks the order confirmed. Confirming twice changes nothing.
    pub fn confirm(&mut self) {
        if !self.is_confirmed() {
            self.status = OrderStatus::Confirmed;
            self.updated_at = Utc::now();
        }
    }

    /// Sum of all line totals, or `None` if it does not fit in a [`Decimal`].
    pub fn total(&self) -> Option<Decimal> {
        order_total(&self.products)
    }

    /// The line for `product_id`, if the order contains it.
    pub fn line(&self, product_id: &ProductId) -> Option<&OrderLineItem> {
        self.products.iter().find(|line| &line.product_id == product_id)
    }
}

/// Payload for persisting an assembled order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: Customer,
    pub products: Vec<OrderLineItem>,
}

/// One requested product and how many units of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: ProductId,
    pub quantity: u32,
}

impl ProductQuantity {
    pub fn new(id: ProductId, quantity: u32) -> Self {
        Self { id, quantity }
    }
}

/// An order as requested by a caller, before any validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: CustomerId,
    pub products: Vec<ProductQuantity>,
}
