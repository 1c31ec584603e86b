//! In-memory repository for development, tests and the demo console

use crate::core::clock::Clock;
use crate::core::collection::Collection;
use crate::core::entity::Record;
use crate::core::error::{ConsoleResult, EntityError, StorageError};
use crate::core::mutation;
use crate::core::schema::EntitySchema;
use crate::core::service::Repository;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in_memory";

/// In-memory repository over one collection
///
/// Each mutation computes the next collection through the mutation engine
/// and swaps it in under the write lock, so readers only ever observe whole
/// collections. Clones share the same storage.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<R: Record> {
    collection: Arc<RwLock<Collection<R>>>,
    schema: EntitySchema,
    clock: Clock,
}

impl<R: Record> InMemoryRepository<R> {
    /// Create an empty repository using the record type's built-in schema
    pub fn new() -> Self {
        Self::with_collection(Collection::new())
    }

    pub fn with_collection(collection: Collection<R>) -> Self {
        Self {
            collection: Arc::new(RwLock::new(collection)),
            schema: R::schema(),
            clock: Clock::System,
        }
    }

    /// Seed from records, rejecting duplicate identities
    pub fn from_records(records: Vec<R>) -> ConsoleResult<Self> {
        Ok(Self::with_collection(Collection::from_records(records)?))
    }

    pub fn with_schema(mut self, schema: EntitySchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    fn read(&self) -> ConsoleResult<Collection<R>> {
        let guard = self.collection.read().map_err(|e| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire read lock: {}", e),
        })?;
        Ok(guard.clone())
    }

    /// Run `step` against the current collection and store what it returns
    fn mutate<T>(
        &self,
        step: impl FnOnce(&Collection<R>) -> ConsoleResult<(Collection<R>, T)>,
    ) -> ConsoleResult<T> {
        let mut guard = self.collection.write().map_err(|e| StorageError::LockPoisoned {
            backend: BACKEND.to_string(),
            message: format!("Failed to acquire write lock: {}", e),
        })?;
        let (next, output) = step(&guard)?;
        *guard = next;
        Ok(output)
    }
}

impl<R: Record> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Repository<R> for InMemoryRepository<R> {
    async fn list(&self) -> ConsoleResult<Collection<R>> {
        self.read()
    }

    async fn get(&self, id: &R::Id) -> ConsoleResult<Option<R>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn create(&self, draft: R::Patch) -> ConsoleResult<R> {
        let now = self.clock.now();
        self.mutate(|current| {
            let created = mutation::create(current, draft, &self.schema, now)?;
            Ok((created.collection, created.record))
        })
    }

    async fn update(&self, id: &R::Id, patch: R::Patch) -> ConsoleResult<R> {
        let now = self.clock.now();
        self.mutate(|current| {
            let next = mutation::update(current, id, patch, &self.schema, now)?;
            let record = next
                .get(id)
                .cloned()
                .ok_or_else(|| EntityError::not_found(R::entity_type(), id))?;
            Ok((next, record))
        })
    }

    async fn delete(&self, id: &R::Id) -> ConsoleResult<bool> {
        self.mutate(|current| {
            let existed = current.contains(id);
            Ok((mutation::delete(current, id), existed))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::playlist::{Playlist, PlaylistPatch, Visibility};
    use chrono::{TimeZone, Utc};

    fn repo() -> InMemoryRepository<Playlist> {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        InMemoryRepository::new().with_clock(Clock::fixed(at))
    }

    fn draft(name: &str) -> PlaylistPatch {
        PlaylistPatch::default().name(name).owner("curator")
    }

    #[tokio::test]
    async fn test_create_playlist() {
        let repo = repo();
        let created = repo.create(draft("Late Night Jazz")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.visibility, Visibility::Private);
    }

    #[tokio::test]
    async fn test_get_playlist() {
        let repo = repo();
        let created = repo.create(draft("Focus")).await.unwrap();
        let fetched = repo.get(&created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let repo = repo();
        for name in ["Focus", "Workout", "Sleep"] {
            repo.create(draft(name)).await.unwrap();
        }
        let names: Vec<String> = repo.list().await.unwrap().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Focus", "Workout", "Sleep"]);
    }

    #[tokio::test]
    async fn test_update_playlist() {
        let repo = repo();
        let created = repo.create(draft("Focus")).await.unwrap();
        let updated = repo
            .update(&created.id, PlaylistPatch::default().visibility(Visibility::Public))
            .await
            .unwrap();
        assert_eq!(updated.visibility, Visibility::Public);
        assert_eq!(updated.name, "Focus");
    }

    #[tokio::test]
    async fn test_rejected_create_leaves_store_untouched() {
        let repo = repo();
        repo.create(draft("Focus")).await.unwrap();
        let result = repo.create(PlaylistPatch::default().name("No owner")).await;
        assert!(result.is_err());
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_playlist() {
        let repo = repo();
        let created = repo.create(draft("Focus")).await.unwrap();
        assert!(repo.delete(&created.id).await.unwrap());
        assert!(!repo.delete(&created.id).await.unwrap());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = repo();
        let other = repo.clone();
        repo.create(draft("Focus")).await.unwrap();
        assert_eq!(other.list().await.unwrap().len(), 1);
    }
}
