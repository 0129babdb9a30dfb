//! Repository trait definitions.

use crate::entity::{Entity, EntityTimestamps, SoftDelete};
use async_trait::async_trait;
use atrium_core::{AtriumResult, Page, PageRequest};

/// Asynchronous repository with soft-delete semantics.
///
/// Deletes are soft by default: the entity is stamped with a deletion
/// timestamp and hidden from queries, unless `permanent` is requested.
/// `with_deleted` widens queries to include soft-deleted rows.
#[async_trait]
pub trait AsyncRepository<T>: Send + Sync
where
    T: Entity + EntityTimestamps + SoftDelete + Send + Sync,
{
    /// Finds an entity by id. Soft-deleted entities are not returned.
    async fn get(&self, id: &T::Id) -> AtriumResult<Option<T>>;

    /// Returns a page of entities.
    async fn get_list(&self, page: PageRequest, with_deleted: bool) -> AtriumResult<Page<T>>;

    /// Whether any entity exists.
    async fn any(&self, with_deleted: bool) -> AtriumResult<bool>;

    /// Counts entities.
    async fn count(&self, with_deleted: bool) -> AtriumResult<u64>;

    /// Persists a new entity, stamping its creation timestamp.
    async fn add(&self, entity: T) -> AtriumResult<T>;

    /// Persists a batch of new entities.
    async fn add_range(&self, entities: Vec<T>) -> AtriumResult<Vec<T>>;

    /// Updates an existing entity, stamping its update timestamp.
    async fn update(&self, entity: T) -> AtriumResult<T>;

    /// Updates a batch of entities.
    async fn update_range(&self, entities: Vec<T>) -> AtriumResult<Vec<T>>;

    /// Deletes an entity: soft by default, permanently when `permanent`.
    async fn delete(&self, entity: T, permanent: bool) -> AtriumResult<T>;

    /// Deletes a batch of entities.
    async fn delete_range(&self, entities: Vec<T>, permanent: bool) -> AtriumResult<Vec<T>>;
}
