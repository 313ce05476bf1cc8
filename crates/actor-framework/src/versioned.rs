//! # Versioned Entities
//!
//! Every entity held by a [`ResourceActor`](crate::ResourceActor) carries a
//! monotonically increasing version. Batch reads hand the version out together
//! with the entity, and batch writes must hand it back: the actor only applies a
//! write when every version still matches (optimistic concurrency).

/// Version of an entity that has never been stored.
pub const NEW_VERSION: u64 = 0;

/// An entity paired with the version it was read at.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub item: T,
    pub version: u64,
}

impl<T> Versioned<T> {
    pub fn new(item: T, version: u64) -> Self {
        Self { item, version }
    }

    /// Wraps an entity that does not exist in the store yet.
    ///
    /// Saving it inserts the entity; saving it when the id is already taken is a conflict.
    pub fn fresh(item: T) -> Self {
        Self::new(item, NEW_VERSION)
    }

    pub fn into_inner(self) -> T {
        self.item
    }

    /// Applies `f` to the wrapped entity, keeping the version it was read at.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Versioned<U> {
        Versioned {
            item: f(self.item),
            version: self.version,
        }
    }
}
