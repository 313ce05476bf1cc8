//! Order assembly: turns a requested product list plus the catalog products
//! it resolved to into order line items.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. request shape: at least one line, positive quantities, no product twice
//! 2. existence: every requested product was resolved
//! 3. stock: every requested quantity is available
//! 4. total: the order total fits in a [`Decimal`](rust_decimal::Decimal)
//!
//! Nothing here touches an actor. Prices are copied from the catalog products
//! into the lines, so the order keeps the price it was sold at.

use crate::model::{order_total, OrderLineItem, Product, ProductId, ProductQuantity};
use crate::order_actor::OrderError;
use std::collections::{HashMap, HashSet};

/// Validates `requested` against `stored` and builds one line per product,
/// in request order.
pub fn assemble(
    requested: &[ProductQuantity],
    stored: &[Product],
) -> Result<Vec<OrderLineItem>, OrderError> {
    check_shape(requested)?;

    let catalog: HashMap<&ProductId, &Product> =
        stored.iter().map(|product| (&product.id, product)).collect();

    if let Some(missing) = requested.iter().find(|r| !catalog.contains_key(&r.id)) {
        return Err(OrderError::ProductNotFound(missing.id.clone()));
    }

    let mut lines = Vec::with_capacity(requested.len());
    for request in requested {
        // Resolved above
        let Some(product) = catalog.get(&request.id) else {
            return Err(OrderError::ProductNotFound(request.id.clone()));
        };
        if request.quantity > product.quantity {
            return Err(OrderError::InsufficientStock {
                product_id: request.id.clone(),
                requested: request.quantity,
                available: product.quantity,
            });
        }
        lines.push(OrderLineItem {
            product_id: request.id.clone(),
            price: product.price,
            quantity: request.quantity,
        });
    }
    if order_total(&lines).is_none() {
        return Err(OrderError::TotalOverflow);
    }
    Ok(lines)
}

fn check_shape(requested: &[ProductQuantity]) -> Result<(), OrderError> {
    if requested.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    let mut seen = HashSet::with_capacity(requested.len());
    for request in requested {
        if request.quantity == 0 {
            return Err(OrderError::InvalidQuantity(request.id.clone()));
        }
        if !seen.insert(&request.id) {
            return Err(OrderError::DuplicateProduct(request.id.clone()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: u32, price: rust_decimal::Decimal, quantity: u32) -> Product {
        Product::new(ProductId(id), format!("Product {id}"), price, quantity)
    }

    fn req(id: u32, quantity: u32) -> ProductQuantity {
        ProductQuantity::new(ProductId(id), quantity)
    }

    #[test]
    fn test_builds_lines_with_price_snapshot() {
        let stored = vec![product(1, dec!(10.00), 5), product(2, dec!(2.50), 1)];

        let lines = assemble(&[req(2, 1), req(1, 3)], &stored).unwrap();

        assert_eq!(
            lines,
            vec![
                OrderLineItem {
                    product_id: ProductId(2),
                    price: dec!(2.50),
                    quantity: 1,
                },
                OrderLineItem {
                    product_id: ProductId(1),
                    price: dec!(10.00),
                    quantity: 3,
                },
            ]
        );
    }

    #[test]
    fn test_exact_stock_is_enough() {
        let stored = vec![product(1, dec!(10.00), 5)];
        assert!(assemble(&[req(1, 5)], &stored).is_ok());
    }

    #[test]
    fn test_insufficient_stock_reports_amounts() {
        let stored = vec![product(1, dec!(10.00), 5)];

        let err = assemble(&[req(1, 6)], &stored).unwrap_err();

        assert_eq!(
            err,
            OrderError::InsufficientStock {
                product_id: ProductId(1),
                requested: 6,
                available: 5,
            }
        );
    }

    #[test]
    fn test_missing_product_wins_over_stock() {
        // product_1 is short on stock, but product_9 does not exist at all
        let stored = vec![product(1, dec!(10.00), 0)];

        let err = assemble(&[req(1, 1), req(9, 1)], &stored).unwrap_err();

        assert_eq!(err, OrderError::ProductNotFound(ProductId(9)));
    }

    #[test]
    fn test_first_missing_product_is_named() {
        let err = assemble(&[req(4, 1), req(5, 1)], &[]).unwrap_err();
        assert_eq!(err, OrderError::ProductNotFound(ProductId(4)));
    }

    #[test]
    fn test_shape_errors() {
        let stored = vec![product(1, dec!(10.00), 5)];

        assert_eq!(assemble(&[], &stored).unwrap_err(), OrderError::EmptyOrder);
        assert_eq!(
            assemble(&[req(1, 0)], &stored).unwrap_err(),
            OrderError::InvalidQuantity(ProductId(1))
        );
        assert_eq!(
            assemble(&[req(1, 1), req(1, 2)], &stored).unwrap_err(),
            OrderError::DuplicateProduct(ProductId(1))
        );
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        // A single line at the highest price and quantity always fits
        let max = crate::model::max_price();
        let stored = vec![product(1, max, u32::MAX), product(2, max, u32::MAX)];
        assert!(assemble(&[req(1, u32::MAX), req(2, u32::MAX)], &stored).is_ok());

        // Enough such lines together do not
        let stored: Vec<Product> = (1..=20_000).map(|id| product(id, max, u32::MAX)).collect();
        let requested: Vec<ProductQuantity> = (1..=20_000).map(|id| req(id, u32::MAX)).collect();
        assert_eq!(
            assemble(&requested, &stored).unwrap_err(),
            OrderError::TotalOverflow
        );
    }

    #[test]
    fn test_unrequested_products_are_ignored() {
        let stored = vec![product(1, dec!(10.00), 5), product(2, dec!(1.00), 0)];

        let lines = assemble(&[req(1, 1)], &stored).unwrap();

        assert_eq!(lines.len(), 1);
    }
}
