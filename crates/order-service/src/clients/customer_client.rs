//! # Customer Client
//!
//! Provides a high‑level API for interacting with the `Customer` actor.
//! It wraps a `ResourceClient<Customer>` and exposes domain‑specific methods.
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId};
use actor_framework::ActorClient;
use actor_framework::{FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            other => match other.entity_error::<CustomerError>() {
                Some(inner) => inner.clone(),
                None => CustomerError::ActorCommunicationError(other.to_string()),
            },
        }
    }
}

impl CustomerClient {
    #[instrument(skip(self))]
    pub async fn create_customer(
        &self,
        params: CustomerCreate,
    ) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;

    #[tokio::test]
    async fn test_validation_error_comes_back_typed() {
        let mut mock = MockClient::<Customer>::new();
        mock.expect_create()
            .return_err(FrameworkError::EntityError(Box::new(
                CustomerError::ValidationError("invalid email: x".into()),
            )));

        let client = CustomerClient::new(mock.client());
        let result = client
            .create_customer(CustomerCreate {
                name: "X".into(),
                email: "x".into(),
            })
            .await;

        assert_eq!(
            result.unwrap_err(),
            CustomerError::ValidationError("invalid email: x".into())
        );
        mock.verify();
    }
}
