/// A catalog product with its price and stock on hand.
///
/// # Actor Framework
/// Managed by the [`product_actor`](crate::product_actor). Stock is changed
/// either through [`ProductUpdate`] or by the
/// [`StockLedger`](crate::services::StockLedger) when an order is accepted.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Number of fractional digits a price may carry.
pub const PRICE_SCALE: u32 = 2;

/// Highest accepted price, in cents. At this price a line of `u32::MAX`
/// units still fits in a [`Decimal`].
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000_000_000;

/// Highest accepted price, `1_000_000_000_000_000.00`.
pub fn max_price() -> Decimal {
    Decimal::new(MAX_PRICE_CENTS, PRICE_SCALE)
}

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// `price` is stored with exactly [`PRICE_SCALE`] fractional digits, so
    /// `10` and `10.00` are the same price. Callers validate it first with
    /// [`is_valid_price`].
    pub fn new(id: ProductId, name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            price: normalize_price(price),
            quantity,
        }
    }
}

/// A price is valid when it is non-negative, needs no more than
/// [`PRICE_SCALE`] fractional digits and does not exceed [`max_price`].
pub fn is_valid_price(price: Decimal) -> bool {
    !price.is_sign_negative()
        && price.normalize().scale() <= PRICE_SCALE
        && price <= max_price()
}

pub(crate) fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price.normalize();
    price.rescale(PRICE_SCALE);
    price
}

/// DTOs for Product creation and updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<Decimal>,
    pub quantity: Option<u32>,
}
