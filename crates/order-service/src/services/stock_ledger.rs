//! Stock ledger: takes the stock for an accepted order out of the catalog,
//! and puts it back if the order cannot be confirmed afterwards.
//!
//! The quantities an order was validated against may be stale by the time the
//! order is stored, so the ledger re-reads them. One attempt is:
//!
//! 1. read every requested product together with its version (one request)
//! 2. adjust the quantities, failing if any would go below zero
//! 3. write all products back in one versioned batch
//!
//! If another writer changed any of the products between 1 and 3, the batch is
//! rejected as a whole and the ledger starts over from 1.

use crate::clients::ProductClient;
use crate::model::{Product, ProductId, ProductQuantity};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;
use actor_framework::Versioned;
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adjustment {
    Take,
    Restore,
}

#[derive(Clone)]
pub struct StockLedger {
    products: ProductClient,
    max_attempts: usize,
}

impl StockLedger {
    /// `max_attempts` bounds the read-write cycles per call; at least one is made.
    pub fn new(products: ProductClient, max_attempts: usize) -> Self {
        Self {
            products,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Decrements stock for every requested product, or for none of them.
    ///
    /// Returns the products as written.
    pub async fn decrement(
        &self,
        requests: &[ProductQuantity],
    ) -> Result<Vec<Product>, OrderError> {
        self.adjust(requests, Adjustment::Take).await
    }

    /// Puts back stock taken by [`decrement`](Self::decrement).
    pub async fn restore(&self, requests: &[ProductQuantity]) -> Result<Vec<Product>, OrderError> {
        self.adjust(requests, Adjustment::Restore).await
    }

    #[instrument(skip(self, requests), fields(lines = requests.len()))]
    async fn adjust(
        &self,
        requests: &[ProductQuantity],
        adjustment: Adjustment,
    ) -> Result<Vec<Product>, OrderError> {
        let ids: Vec<ProductId> = requests.iter().map(|r| r.id.clone()).collect();

        for attempt in 1..=self.max_attempts {
            let current = self.products.find(ids.clone()).await?;
            let updated = apply(current, requests, adjustment)?;

            match self.products.save_all(updated).await {
                Ok(saved) => {
                    debug!(attempt, "Stock committed");
                    return Ok(saved);
                }
                Err(ProductError::Conflict(product_id)) => {
                    warn!(attempt, %product_id, "Stock changed concurrently, retrying");
                    tokio::task::yield_now().await;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(OrderError::ConcurrencyConflict {
            attempts: self.max_attempts,
        })
    }
}

/// Applies each requested quantity to the matching product, keeping the
/// versions it was read with. Output follows request order.
fn apply(
    current: Vec<Versioned<Product>>,
    requests: &[ProductQuantity],
    adjustment: Adjustment,
) -> Result<Vec<Versioned<Product>>, OrderError> {
    let mut by_id: HashMap<ProductId, Versioned<Product>> = current
        .into_iter()
        .map(|stored| (stored.item.id.clone(), stored))
        .collect();

    let mut updated = Vec::with_capacity(requests.len());
    for request in requests {
        let mut stored = by_id
            .remove(&request.id)
            .ok_or_else(|| OrderError::ProductNotFound(request.id.clone()))?;
        let available = stored.item.quantity;
        stored.item.quantity = match adjustment {
            Adjustment::Take => available.checked_sub(request.quantity).ok_or_else(|| {
                OrderError::InsufficientStock {
                    product_id: request.id.clone(),
                    requested: request.quantity,
                    available,
                }
            })?,
            Adjustment::Restore => available.checked_add(request.quantity).ok_or_else(|| {
                OrderError::ValidationError(format!("stock of {} would overflow", request.id))
            })?,
        };
        updated.push(stored);
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use rust_decimal_macros::dec;

    fn stored(id: u32, quantity: u32, version: u64) -> Versioned<Product> {
        Versioned::new(
            Product::new(ProductId(id), "Widget", dec!(10.00), quantity),
            version,
        )
    }

    fn req(id: u32, quantity: u32) -> ProductQuantity {
        ProductQuantity::new(ProductId(id), quantity)
    }

    #[test]
    fn test_apply_keeps_versions_and_request_order() {
        let current = vec![stored(1, 5, 2), stored(2, 1, 7)];

        let updated = apply(current, &[req(2, 1), req(1, 3)], Adjustment::Take).unwrap();

        assert_eq!(updated[0].item.id, ProductId(2));
        assert_eq!(updated[0].item.quantity, 0);
        assert_eq!(updated[0].version, 7);
        assert_eq!(updated[1].item.quantity, 2);
        assert_eq!(updated[1].version, 2);
    }

    #[test]
    fn test_apply_rejects_going_below_zero() {
        let err = apply(vec![stored(1, 2, 1)], &[req(1, 3)], Adjustment::Take).unwrap_err();

        assert_eq!(
            err,
            OrderError::InsufficientStock {
                product_id: ProductId(1),
                requested: 3,
                available: 2,
            }
        );
    }

    #[test]
    fn test_restore_adds_back() {
        let updated = apply(vec![stored(1, 2, 3)], &[req(1, 3)], Adjustment::Restore).unwrap();

        assert_eq!(updated[0].item.quantity, 5);
        assert_eq!(updated[0].version, 3);
    }

    #[test]
    fn test_apply_rejects_vanished_product() {
        let err = apply(vec![stored(1, 2, 1)], &[req(1, 1), req(2, 1)], Adjustment::Take)
            .unwrap_err();
        assert_eq!(err, OrderError::ProductNotFound(ProductId(2)));
    }

    fn conflict() -> actor_framework::FrameworkError {
        actor_framework::FrameworkError::Conflict {
            id: "product_1".into(),
            expected: 1,
            actual: 2,
        }
    }

    #[tokio::test]
    async fn test_retries_after_conflict_with_fresh_read() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_find_many().return_ok(vec![stored(1, 5, 1)]);
        mock.expect_save_many().return_err(conflict());
        mock.expect_find_many().return_ok(vec![stored(1, 4, 2)]);
        mock.expect_save_many()
            .return_ok(vec![Product::new(ProductId(1), "Widget", dec!(10.00), 1)]);

        let ledger = StockLedger::new(ProductClient::new(mock.client()), 3);
        let saved = ledger.decrement(&[req(1, 3)]).await.unwrap();

        assert_eq!(saved[0].quantity, 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let mut mock = MockClient::<Product>::new();
        for _ in 0..2 {
            mock.expect_find_many().return_ok(vec![stored(1, 5, 1)]);
            mock.expect_save_many().return_err(conflict());
        }

        let ledger = StockLedger::new(ProductClient::new(mock.client()), 2);
        let err = ledger.decrement(&[req(1, 1)]).await.unwrap_err();

        assert_eq!(err, OrderError::ConcurrencyConflict { attempts: 2 });
        mock.verify();
    }

    #[tokio::test]
    async fn test_stock_shortage_on_reread_is_not_retried() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_find_many().return_ok(vec![stored(1, 2, 4)]);

        let ledger = StockLedger::new(ProductClient::new(mock.client()), 5);
        let err = ledger.decrement(&[req(1, 3)]).await.unwrap_err();

        assert!(matches!(err, OrderError::InsufficientStock { available: 2, .. }));
        mock.verify();
    }
}
