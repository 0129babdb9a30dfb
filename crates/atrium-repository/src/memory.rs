//! In-memory repository.

use crate::entity::{Entity, EntityTimestamps, SoftDelete};
use crate::repository::AsyncRepository;
use async_trait::async_trait;
use atrium_core::{AtriumError, AtriumResult, Page, PageRequest};
use chrono::Utc;
use parking_lot::Mutex;

/// In-memory [`AsyncRepository`] implementation.
///
/// Entities are kept in insertion order, which makes pagination stable.
/// The substitution point for tests, and a reference for what the
/// soft-delete contract means operationally.
pub struct MemoryRepository<T> {
    entities: Mutex<Vec<T>>,
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self {
            entities: Mutex::new(Vec::new()),
        }
    }
}

impl<T> MemoryRepository<T>
where
    T: Entity + EntityTimestamps + SoftDelete + Clone + Send + Sync,
{
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds the first live entity matching a predicate.
    pub fn find<P: Fn(&T) -> bool>(&self, predicate: P) -> Option<T> {
        self.entities
            .lock()
            .iter()
            .find(|entity| !entity.is_deleted() && predicate(entity))
            .cloned()
    }

    fn visible(entity: &T, with_deleted: bool) -> bool {
        with_deleted || !entity.is_deleted()
    }
}

#[async_trait]
impl<T> AsyncRepository<T> for MemoryRepository<T>
where
    T: Entity + EntityTimestamps + SoftDelete + Clone + Send + Sync,
{
    async fn get(&self, id: &T::Id) -> AtriumResult<Option<T>> {
        Ok(self
            .entities
            .lock()
            .iter()
            .find(|entity| entity.id() == *id && !entity.is_deleted())
            .cloned())
    }

    async fn get_list(&self, page: PageRequest, with_deleted: bool) -> AtriumResult<Page<T>> {
        let entities = self.entities.lock();
        let visible: Vec<&T> = entities
            .iter()
            .filter(|entity| Self::visible(entity, with_deleted))
            .collect();

        let total = visible.len() as u64;
        let items = visible
            .into_iter()
            .skip(page.offset())
            .take(page.limit())
            .cloned()
            .collect();

        Ok(Page::new(items, page, total))
    }

    async fn any(&self, with_deleted: bool) -> AtriumResult<bool> {
        Ok(self
            .entities
            .lock()
            .iter()
            .any(|entity| Self::visible(entity, with_deleted)))
    }

    async fn count(&self, with_deleted: bool) -> AtriumResult<u64> {
        Ok(self
            .entities
            .lock()
            .iter()
            .filter(|entity| Self::visible(entity, with_deleted))
            .count() as u64)
    }

    async fn add(&self, mut entity: T) -> AtriumResult<T> {
        entity.set_created_at(Utc::now());
        self.entities.lock().push(entity.clone());
        Ok(entity)
    }

    async fn add_range(&self, entities: Vec<T>) -> AtriumResult<Vec<T>> {
        let mut added = Vec::with_capacity(entities.len());
        for entity in entities {
            added.push(self.add(entity).await?);
        }
        Ok(added)
    }

    async fn update(&self, mut entity: T) -> AtriumResult<T> {
        entity.set_updated_at(Utc::now());

        let mut entities = self.entities.lock();
        let slot = entities
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
            .ok_or_else(|| AtriumError::not_found("entity", "unknown"))?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn update_range(&self, entities: Vec<T>) -> AtriumResult<Vec<T>> {
        let mut updated = Vec::with_capacity(entities.len());
        for entity in entities {
            updated.push(self.update(entity).await?);
        }
        Ok(updated)
    }

    async fn delete(&self, mut entity: T, permanent: bool) -> AtriumResult<T> {
        let mut entities = self.entities.lock();

        if permanent {
            entities.retain(|existing| existing.id() != entity.id());
            return Ok(entity);
        }

        entity.mark_deleted(Utc::now());
        let slot = entities
            .iter_mut()
            .find(|existing| existing.id() == entity.id())
            .ok_or_else(|| AtriumError::not_found("entity", "unknown"))?;
        *slot = entity.clone();

        Ok(entity)
    }

    async fn delete_range(&self, entities: Vec<T>, permanent: bool) -> AtriumResult<Vec<T>> {
        let mut deleted = Vec::with_capacity(entities.len());
        for entity in entities {
            deleted.push(self.delete(entity, permanent).await?);
        }
        Ok(deleted)
    }
}
