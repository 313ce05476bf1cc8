//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the server half of the framework. It
//! owns the entity store for one resource type and processes requests one at a
//! time, so no request ever observes another one half-applied.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::versioned::{Versioned, NEW_VERSION};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// Each actor runs in its own Tokio task and owns its `store` outright, so the
/// store needs no `Mutex`. Every stored entity carries a version that starts at
/// 1 and is bumped by every successful update, action or save.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Widget { id: u32 }
/// #[derive(Debug)] struct WidgetCreate;
/// #[derive(Debug)] struct WidgetUpdate;
/// #[derive(Debug)] enum WidgetAction {}
/// #[derive(Debug, thiserror::Error)] #[error("widget error")] struct WidgetError;
///
/// #[async_trait]
/// impl ActorEntity for Widget {
///     type Id = u32;
///     type Create = WidgetCreate;
///     type Update = WidgetUpdate;
///     type Action = WidgetAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = WidgetError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: WidgetCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: WidgetUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: WidgetAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Widget>::new(10);
///     tokio::spawn(actor.run(()));
///     let id = client.create(WidgetCreate).await.unwrap();
///     assert!(client.get(id).await.unwrap().is_some());
/// }
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Versioned<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity. When the mailbox is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    ///
    /// The `context` is borrowed by every entity hook for the lifetime of the loop.
    pub async fn run(mut self, context: T::Context) {
        // "Product" instead of "order_service::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    self.handle_create(entity_type, params, &context, respond_to)
                        .await;
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).map(|stored| stored.item.clone());
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    self.handle_update(entity_type, id, update, &context, respond_to)
                        .await;
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    self.handle_delete(entity_type, id, &context, respond_to)
                        .await;
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    self.handle_action(entity_type, id, action, &context, respond_to)
                        .await;
                }
                ResourceRequest::FindMany { ids, respond_to } => {
                    let found = self.find_many(&ids);
                    debug!(
                        entity_type,
                        requested = ids.len(),
                        found = found.len(),
                        "FindMany"
                    );
                    let _ = respond_to.send(Ok(found));
                }
                ResourceRequest::SaveMany { items, respond_to } => {
                    debug!(entity_type, count = items.len(), "SaveMany");
                    let result = self.save_many(items);
                    match &result {
                        Ok(saved) => info!(entity_type, count = saved.len(), "Saved"),
                        Err(e) => warn!(entity_type, error = %e, "SaveMany rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let items = self
                        .store
                        .values()
                        .map(|stored| stored.item.clone())
                        .collect();
                    let _ = respond_to.send(Ok(items));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle_create(
        &mut self,
        entity_type: &str,
        params: T::Create,
        context: &T::Context,
        respond_to: Response<T::Id>,
    ) {
        let id = self.allocate_id();

        let mut item = match T::from_create_params(id.clone(), params) {
            Ok(item) => item,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                return;
            }
        };
        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.insert(id.clone(), Versioned::new(item, 1));
        info!(entity_type, %id, size = self.store.len(), "Created");
        let _ = respond_to.send(Ok(id));
    }

    async fn handle_update(
        &mut self,
        entity_type: &str,
        id: T::Id,
        update: T::Update,
        context: &T::Context,
        respond_to: Response<T>,
    ) {
        let Some(stored) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        // Hooks work on a copy so a failed update leaves the stored entity untouched.
        let mut item = stored.item.clone();
        if let Err(e) = item.on_update(update, context).await {
            warn!(entity_type, %id, error = %e, "Update failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        stored.item = item.clone();
        stored.version += 1;
        info!(entity_type, %id, version = stored.version, "Updated");
        let _ = respond_to.send(Ok(item));
    }

    async fn handle_delete(
        &mut self,
        entity_type: &str,
        id: T::Id,
        context: &T::Context,
        respond_to: Response<()>,
    ) {
        let Some(stored) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        if let Err(e) = stored.item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        let _ = respond_to.send(Ok(()));
    }

    async fn handle_action(
        &mut self,
        entity_type: &str,
        id: T::Id,
        action: T::Action,
        context: &T::Context,
        respond_to: Response<T::ActionResult>,
    ) {
        let Some(stored) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };
        let mut item = stored.item.clone();
        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(_) => {
                stored.item = item;
                stored.version += 1;
                info!(entity_type, %id, "Action ok");
            }
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        let _ = respond_to.send(result);
    }

    fn find_many(&self, ids: &[T::Id]) -> Vec<Versioned<T>> {
        let mut seen = HashSet::new();
        ids.iter()
            .filter(|id| seen.insert(*id))
            .filter_map(|id| self.store.get(id).cloned())
            .collect()
    }

    /// Applies a batch of versioned writes, or none of them.
    ///
    /// A batch may name each id at most once.
    /// Next unused sequential id. Skips ids that `save_many` inserted directly.
    fn allocate_id(&mut self) -> T::Id {
        loop {
            let id = T::Id::from(self.next_id);
            self.next_id += 1;
            if !self.store.contains_key(&id) {
                return id;
            }
        }
    }

    fn save_many(&mut self, items: Vec<Versioned<T>>) -> Result<Vec<T>, FrameworkError> {
        let mut seen = HashSet::new();
        for Versioned { item, version } in &items {
            let id = item.id();
            let actual = self
                .store
                .get(id)
                .map_or(NEW_VERSION, |stored| stored.version);
            if !seen.insert(id.clone()) || actual != *version {
                return Err(FrameworkError::Conflict {
                    id: id.to_string(),
                    expected: *version,
                    actual,
                });
            }
        }

        let mut saved = Vec::with_capacity(items.len());
        for Versioned { item, version } in items {
            self.store
                .insert(item.id().clone(), Versioned::new(item.clone(), version + 1));
            saved.push(item);
        }
        Ok(saved)
    }
}
