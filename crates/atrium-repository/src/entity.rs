//! Entity and timestamp contracts.

use chrono::{DateTime, Utc};

/// An identifiable entity.
pub trait Entity {
    /// The entity's identifier type.
    type Id: Clone + Eq + Send + Sync;

    /// Returns the entity's identifier.
    fn id(&self) -> Self::Id;
}

/// Creation, update, and deletion timestamps maintained by the repository.
pub trait EntityTimestamps {
    /// When the entity was persisted.
    fn created_at(&self) -> Option<DateTime<Utc>>;
    /// Sets the creation timestamp.
    fn set_created_at(&mut self, at: DateTime<Utc>);

    /// When the entity was last updated.
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    /// Sets the update timestamp.
    fn set_updated_at(&mut self, at: DateTime<Utc>);

    /// When the entity was soft-deleted, if it was.
    fn deleted_at(&self) -> Option<DateTime<Utc>>;
    /// Sets or clears the deletion timestamp.
    fn set_deleted_at(&mut self, at: Option<DateTime<Utc>>);
}

/// Soft deletion with cascade.
///
/// The default implementation marks only the entity itself. Aggregates that
/// own child records override [`mark_deleted`](SoftDelete::mark_deleted) to
/// mark those children too, so a soft-deleted parent never leaves live
/// children behind. Entities on the dependent side of a one-to-one
/// relation must not be soft-deleted through their parent; re-creating the
/// parent would collide with the surviving unique key.
pub trait SoftDelete: EntityTimestamps {
    /// Marks this entity and any owned children as deleted.
    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.set_deleted_at(Some(at));
    }

    /// Whether the entity is soft-deleted.
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}
