use actor_framework::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    units: u32,
    locked: bool,
}

#[derive(Debug)]
struct BinCreate {
    label: String,
    units: u32,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum BinAction {
    Lock,
}

#[derive(Debug, thiserror::Error)]
#[error("Bin error")]
struct BinError;

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = bool;
    type Context = ();
    type Error = BinError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            label: params.label,
            units: params.units,
            locked: false,
        })
    }

    async fn on_update(
        &mut self,
        update: BinUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(label) = update.label {
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: BinAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            BinAction::Lock => {
                let changed = !self.locked;
                self.locked = true;
                Ok(changed)
            }
        }
    }
}

/// Read-modify-write of one bin through `find_many` + `save_many`, retrying on conflict.
async fn take_one(client: &ResourceClient<Bin>, id: u32) -> Result<bool, FrameworkError> {
    loop {
        let mut found = client.find_many(vec![id]).await?;
        let Some(mut stored) = found.pop() else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        if stored.item.units == 0 {
            return Ok(false);
        }
        stored.item.units -= 1;
        match client.save_many(vec![stored]).await {
            Ok(_) => return Ok(true),
            Err(FrameworkError::Conflict { .. }) => {
                tokio::task::yield_now().await;
                continue;
            }
            Err(e) => return Err(e),
        }
    }
}

// --- Test ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client
        .create(BinCreate {
            label: "A-01".into(),
            units: 4,
        })
        .await
        .unwrap();
    assert_eq!(id, 1); // First ID should be 1

    // 2. Action
    let changed: bool = client.perform_action(id, BinAction::Lock).await.unwrap();
    assert!(changed);
    let changed_again: bool = client.perform_action(id, BinAction::Lock).await.unwrap();
    assert!(!changed_again);

    // 3. Update
    let updated: Bin = client
        .update(
            id,
            BinUpdate {
                label: Some("B-07".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "B-07");
    assert!(updated.locked);

    // create + 2 actions + update
    let versioned = client.find_many(vec![id]).await.unwrap();
    assert_eq!(versioned[0].version, 4);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_read_modify_write_never_oversells() {
    let (actor, client) = ResourceActor::new(64);
    tokio::spawn(actor.run(()));

    let id = client
        .create(BinCreate {
            label: "hot".into(),
            units: 10,
        })
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..25 {
        let client = client.clone();
        handles.push(tokio::spawn(async move { take_one(&client, id).await }));
    }

    let mut taken = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap() {
            taken += 1;
        }
    }

    // Exactly the 10 available units were handed out, none twice
    assert_eq!(taken, 10);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}
