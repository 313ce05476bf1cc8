//! # Product Client
//!
//! Provides a high‑level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes the catalog lookup and the
//! versioned batch reads and writes the stock ledger is built on.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient, Versioned};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            FrameworkError::Conflict { id, .. } => ProductError::Conflict(id),
            other => match other.entity_error::<ProductError>() {
                Some(inner) => inner.clone(),
                None => ProductError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Check the current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock for product {}", id);
        let ProductActionResult::CheckStock(level) = self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?;
        Ok(level)
    }

    /// Catalog lookup: resolves `ids` to the current products in one request.
    ///
    /// Unknown ids are left out of the result, so callers compare counts to
    /// detect them. All products come from the same snapshot of the catalog.
    #[instrument(skip(self))]
    pub async fn find_all_by_id(&self, ids: Vec<ProductId>) -> Result<Vec<Product>, ProductError> {
        let found = self.find(ids).await?;
        Ok(found.into_iter().map(Versioned::into_inner).collect())
    }

    /// Like [`find_all_by_id`](Self::find_all_by_id), but keeps each product's
    /// storage version for a later [`save_all`](Self::save_all).
    #[instrument(skip(self))]
    pub async fn find(&self, ids: Vec<ProductId>) -> Result<Vec<Versioned<Product>>, ProductError> {
        debug!("Sending request");
        self.inner.find_many(ids).await.map_err(Self::map_error)
    }

    /// Writes every product back in one request.
    ///
    /// Nothing is written unless every product still has the version it was
    /// read with; otherwise the call fails with [`ProductError::Conflict`].
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn save_all(
        &self,
        products: Vec<Versioned<Product>>,
    ) -> Result<Vec<Product>, ProductError> {
        debug!(?products, "Sending request");
        self.inner.save_many(products).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{
        create_mock_client, expect_action, expect_create, expect_find_many, expect_save_many,
    };
    use rust_decimal_macros::dec;

    fn widget(id: u32, quantity: u32) -> Product {
        Product::new(ProductId(id), "Widget", dec!(10.00), quantity)
    }

    #[tokio::test]
    async fn test_check_stock_returns_correct_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let check_task =
            tokio::spawn(async move { product_client.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");

        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));

        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        let result = check_task.await.unwrap();
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_find_all_by_id_is_one_batch_request() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let lookup = tokio::spawn(async move {
            product_client
                .find_all_by_id(vec![ProductId(1), ProductId(2), ProductId(3)])
                .await
        });

        let (ids, responder) = expect_find_many(&mut receiver)
            .await
            .expect("Expected FindMany request");
        assert_eq!(ids, vec![ProductId(1), ProductId(2), ProductId(3)]);

        // product_2 is unknown and simply missing from the reply
        responder
            .send(Ok(vec![
                Versioned::new(widget(1, 5), 3),
                Versioned::new(widget(3, 1), 1),
            ]))
            .unwrap();

        let products = lookup.await.unwrap().unwrap();
        assert_eq!(products, vec![widget(1, 5), widget(3, 1)]);

        // No second request was made
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_save_all_reports_conflict() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let save = tokio::spawn(async move {
            product_client
                .save_all(vec![Versioned::new(widget(1, 2), 1)])
                .await
        });

        let (items, responder) = expect_save_many(&mut receiver)
            .await
            .expect("Expected SaveMany request");
        assert_eq!(items[0].version, 1);
        assert_eq!(items[0].item.quantity, 2);

        responder
            .send(Err(FrameworkError::Conflict {
                id: "product_1".into(),
                expected: 1,
                actual: 2,
            }))
            .unwrap();

        let result = save.await.unwrap();
        assert_eq!(result.unwrap_err(), ProductError::Conflict("product_1".into()));
    }

    #[tokio::test]
    async fn test_create_product_keeps_entity_error_type() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let create = tokio::spawn(async move {
            product_client
                .create_product(ProductCreate {
                    name: "Widget".into(),
                    price: dec!(-5.00),
                    quantity: 1,
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                ProductError::InvalidPrice(params.price),
            ))))
            .unwrap();

        let result = create.await.unwrap();
        assert_eq!(result.unwrap_err(), ProductError::InvalidPrice(dec!(-5.00)));
    }

    #[tokio::test]
    async fn test_closed_actor_is_a_communication_error() {
        let (client, receiver) = create_mock_client::<Product>(10);
        drop(receiver);

        let result = ProductClient::new(client).check_stock(ProductId(1)).await;
        assert!(matches!(
            result,
            Err(ProductError::ActorCommunicationError(_))
        ));
    }
}
