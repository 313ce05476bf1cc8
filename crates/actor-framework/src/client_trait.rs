//! # ActorClient Trait
//!
//! Common surface for resource-specific clients: `get`, `delete` and `list`
//! come for free once a client exposes its inner [`ResourceClient`] and says how
//! framework errors translate into its own error type.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read/delete operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Customer { id: u32 }
/// #[derive(Debug)] struct CustomerCreate;
/// #[derive(Debug)] struct CustomerUpdate;
/// #[derive(Debug)] enum CustomerAction {}
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct CustomerError(String);
///
/// impl From<String> for CustomerError {
///     fn from(s: String) -> Self { CustomerError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Customer {
///     type Id = u32;
///     type Create = CustomerCreate;
///     type Update = CustomerUpdate;
///     type Action = CustomerAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CustomerError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: CustomerCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: CustomerUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CustomerAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct CustomerClient {
///     inner: ResourceClient<Customer>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Customer> for CustomerClient {
///     type Error = CustomerError;
///
///     fn inner(&self) -> &ResourceClient<Customer> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CustomerError(e.to_string())
///     }
/// }
///
/// async fn usage(client: CustomerClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    /// Fetch every stored entity.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }
}
