//! # Mock Framework & Testing Guide
//!
//! Test doubles for a [`ResourceClient`]: the client is real, but the actor on
//! the other end of the channel is replaced.
//!
//! | | [`MockClient`] | [`create_mock_client`] | Real actor |
//! |---|---|---|---|
//! | **Replies** | Queued expectations | Whatever the test sends | Real store |
//! | **Inspects requests** | Ids only | Everything | No |
//! | **Error injection** | `return_err` | Send any `Err` | Needs real state |
//!
//! ## Testing Strategies
//!
//! - **Pattern 0, client logic**: a typed client over a mock, no actor at all.
//! - **Pattern 1, single actor**: spawn one `ResourceActor` and drive it.
//! - **Pattern 2, service with mocked dependencies**: a service (e.g. order
//!   creation) talking to mocks, to check which calls it makes and how it
//!   reacts to failures it could not easily provoke with real actors.
//! - **Pattern 3, full system**: every actor real, end to end.
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Supplier { id: u32 }
//! #[derive(Debug)] struct SupplierCreate;
//! #[derive(Debug)] struct SupplierUpdate;
//! #[derive(Debug)] enum SupplierAction {}
//! #[derive(Debug, thiserror::Error)] #[error("supplier error")] struct SupplierError;
//!
//! #[async_trait]
//! impl ActorEntity for Supplier {
//!     type Id = u32; type Create = SupplierCreate; type Update = SupplierUpdate;
//!     type Action = SupplierAction; type ActionResult = (); type Context = (); type Error = SupplierError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: SupplierCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: SupplierUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: SupplierAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Supplier>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::versioned::Versioned;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// The canned reply for one expected request.
enum Reply<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Delete(Result<(), FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
    FindMany(Result<Vec<Versioned<T>>, FrameworkError>),
    SaveMany(Result<Vec<T>, FrameworkError>),
    List(Result<Vec<T>, FrameworkError>),
}

/// An expected request: the id it must target (if any) and the reply.
struct Expectation<T: ActorEntity> {
    id: Option<T::Id>,
    reply: Reply<T>,
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched against expectations strictly in order. A request of
/// the wrong kind, or for a different id than expected, panics the mock task,
/// after which the client sees `ActorDropped`/`ActorClosed`.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Customer>::new();
/// mock.expect_get(CustomerId(1)).return_ok(Some(customer));
///
/// let client = CustomerClient::new(mock.client());
/// // exercise code under test...
/// mock.verify(); // every expectation was consumed
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some(Expectation { id, reply }) = next else {
                    panic!("Unexpected request: no expectations left");
                };
                respond(request, id, reply);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &mut self,
        id: Option<T::Id>,
        make: fn(Result<R, FrameworkError>) -> Reply<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            make,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), Reply::Get)
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, Reply::Create)
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), Reply::Update)
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), Reply::Delete)
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), Reply::Action)
    }

    /// Expects a batch `find_many`.
    pub fn expect_find_many(&mut self) -> ExpectationBuilder<T, Vec<Versioned<T>>> {
        self.builder(None, Reply::FindMany)
    }

    /// Expects a batch `save_many`.
    pub fn expect_save_many(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, Reply::SaveMany)
    }

    /// Expects a `list`.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, Reply::List)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(expected: Option<I>, actual: &I) {
    if let Some(expected) = expected {
        assert_eq!(&expected, actual, "Request targeted an unexpected id");
    }
}

fn respond<T: ActorEntity>(request: ResourceRequest<T>, id: Option<T::Id>, reply: Reply<T>) {
    match (request, reply) {
        (ResourceRequest::Get { id: actual, respond_to }, Reply::Get(response)) => {
            check_id(id, &actual);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Reply::Create(response)) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Update {
                id: actual,
                respond_to,
                ..
            },
            Reply::Update(response),
        ) => {
            check_id(id, &actual);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Delete { id: actual, respond_to }, Reply::Delete(response)) => {
            check_id(id, &actual);
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action {
                id: actual,
                respond_to,
                ..
            },
            Reply::Action(response),
        ) => {
            check_id(id, &actual);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::FindMany { respond_to, .. }, Reply::FindMany(response)) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::SaveMany { respond_to, .. }, Reply::SaveMany(response)) => {
            let _ = respond_to.send(response);
        }
        (ResourceRequest::List { respond_to }, Reply::List(response)) => {
            let _ = respond_to.send(response);
        }
        _ => panic!("Unexpected request or expectation mismatch"),
    }
}

/// Queues the reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    make: fn(Result<R, FrameworkError>) -> Reply<T>,
    expectations: Expectations<T>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation {
            id: self.id,
            reply: (self.make)(response),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// One-shot reply channel handed back by the `expect_*` helpers.
pub type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a client whose requests land on the returned receiver.
///
/// The test pulls requests off the receiver with the `expect_*` helpers,
/// asserts on their payloads, and answers through the responder. Dropping the
/// receiver makes every further call fail with `ActorClosed`.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Responder<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Responder<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Responder<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindMany request
pub async fn expect_find_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<T::Id>, Responder<Vec<Versioned<T>>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::FindMany { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a SaveMany request
pub async fn expect_save_many<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Vec<Versioned<T>>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::SaveMany { items, respond_to }) => Some((items, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Shelf {
        id: u32,
        label: String,
        items: u32,
    }

    #[derive(Debug)]
    struct ShelfCreate {
        label: String,
    }

    #[derive(Debug)]
    struct ShelfUpdate;

    #[derive(Debug)]
    enum ShelfAction {
        Count,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Shelf error")]
    struct ShelfError;

    #[async_trait]
    impl ActorEntity for Shelf {
        type Id = u32;
        type Create = ShelfCreate;
        type Update = ShelfUpdate;
        type Action = ShelfAction;
        type ActionResult = u32;
        type Context = ();
        type Error = ShelfError;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                label: params.label,
                items: 0,
            })
        }

        async fn on_update(
            &mut self,
            _update: ShelfUpdate,
            _ctx: &Self::Context,
        ) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: ShelfAction,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            match action {
                ShelfAction::Count => Ok(self.items),
            }
        }
    }

    fn shelf(id: u32, items: u32) -> Shelf {
        Shelf {
            id,
            label: format!("shelf {id}"),
            items,
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client_create() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(ShelfCreate {
                    label: "A1".to_string(),
                })
                .await
        });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.label, "A1");
        responder.send(Ok(7)).unwrap();

        assert_eq!(create_task.await.unwrap().unwrap(), 7);
    }

    #[tokio::test]
    async fn test_raw_mock_client_batch_requests() {
        let (client, mut receiver) = create_mock_client::<Shelf>(10);

        let task = tokio::spawn(async move {
            let found = client.find_many(vec![1, 2]).await?;
            client.save_many(found).await
        });

        let (ids, responder) = expect_find_many(&mut receiver)
            .await
            .expect("Expected FindMany request");
        assert_eq!(ids, vec![1, 2]);
        responder
            .send(Ok(vec![Versioned::new(shelf(1, 3), 4)]))
            .unwrap();

        let (items, responder) = expect_save_many(&mut receiver)
            .await
            .expect("Expected SaveMany request");
        assert_eq!(items, vec![Versioned::new(shelf(1, 3), 4)]);
        responder.send(Ok(vec![shelf(1, 3)])).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), vec![shelf(1, 3)]);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_create().return_ok(1);
        mock.expect_get(1).return_ok(Some(shelf(1, 0)));
        mock.expect_action(1).return_ok(12);
        mock.expect_find_many().return_ok(vec![Versioned::new(shelf(1, 12), 2)]);
        mock.expect_save_many().return_err(FrameworkError::Conflict {
            id: "1".to_string(),
            expected: 2,
            actual: 3,
        });

        let client = mock.client();
        let id = client
            .create(ShelfCreate {
                label: "A1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(id, 1);
        assert!(client.get(1).await.unwrap().is_some());
        assert_eq!(client.perform_action(1, ShelfAction::Count).await.unwrap(), 12);

        let found = client.find_many(vec![1]).await.unwrap();
        let saved = client.save_many(found).await;
        assert!(matches!(saved, Err(FrameworkError::Conflict { actual: 3, .. })));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mock_client_wrong_request_closes_client() {
        let mut mock = MockClient::<Shelf>::new();
        mock.expect_list().return_ok(vec![]);

        // A `get` where a `list` was expected kills the mock task
        let result = mock.client().get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
