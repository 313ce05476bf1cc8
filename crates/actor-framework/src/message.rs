//! # Generic Messages
//!
//! The request enum a [`ResourceClient`](crate::ResourceClient) sends to its
//! [`ResourceActor`](crate::ResourceActor), one variant per operation, each
//! with its own one-shot reply channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::versioned::Versioned;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The single-entity variants map to **CRUD** plus a custom `Action`.
/// The batch variants (`FindMany`, `SaveMany`, `List`) are answered while the
/// actor handles one message, so each of them sees or changes the store as a
/// single consistent unit:
///
/// - **FindMany**: one round trip for many ids. Unknown ids are skipped.
/// - **SaveMany**: bulk upsert. Every item carries the version it was read at;
///   if any version is stale the whole batch is rejected and nothing changes.
/// - **List**: every stored entity.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    FindMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<Versioned<T>>>,
    },
    SaveMany {
        items: Vec<Versioned<T>>,
        respond_to: Response<Vec<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
}
