//! Repository seam between the engine and whatever stores the records

use crate::core::collection::Collection;
use crate::core::entity::Record;
use crate::core::error::ConsoleResult;
use async_trait::async_trait;

/// Storage for the records of one console screen
///
/// The engine never talks to a backend directly: list views and dashboards
/// read a [`Collection`] from a repository and push mutations back through
/// it, so a networked store can replace the in-memory one without touching
/// filtering, pagination or aggregation.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// Current authoritative collection, in display order
    async fn list(&self) -> ConsoleResult<Collection<R>>;

    /// Get a record by identity
    async fn get(&self, id: &R::Id) -> ConsoleResult<Option<R>>;

    /// Validate a draft, assign an identity and store the new record
    async fn create(&self, draft: R::Patch) -> ConsoleResult<R>;

    /// Merge a patch into an existing record
    async fn update(&self, id: &R::Id, patch: R::Patch) -> ConsoleResult<R>;

    /// Remove a record; returns whether one was removed
    async fn delete(&self, id: &R::Id) -> ConsoleResult<bool>;
}
