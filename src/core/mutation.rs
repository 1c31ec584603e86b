//! Mutation engine: create, update and delete against an immutable collection
//!
//! Every operation takes the current [`Collection`] by reference and returns
//! the next one. A rejected mutation leaves the caller's collection untouched
//! because nothing was ever written to it.

use crate::core::collection::Collection;
use crate::core::entity::{Identity, Patch, Record};
use crate::core::error::{ConsoleResult, EntityError};
use crate::core::schema::EntitySchema;
use crate::core::validation::{validate_create, validate_update};
use chrono::{DateTime, Utc};

/// Result of a successful create
#[derive(Debug, Clone)]
pub struct Created<R: Record> {
    pub collection: Collection<R>,
    pub record: R,
}

impl<R: Record> Created<R> {
    pub fn id(&self) -> &R::Id {
        self.record.id()
    }
}

/// Validate a draft, assign a fresh identity and append the new record
///
/// Both timestamps of the new record are `now`.
pub fn create<R: Record>(
    collection: &Collection<R>,
    draft: R::Patch,
    schema: &EntitySchema,
    now: DateTime<Utc>,
) -> ConsoleResult<Created<R>> {
    let Some(id) = R::Id::next_after(collection.ids()) else {
        tracing::warn!(entity_type = R::entity_type(), "no identity left to assign");
        return Err(EntityError::exhausted(R::entity_type()).into());
    };
    let candidate = R::from_draft(id.clone(), draft.clone(), now);

    if let Err(err) = validate_create::<R>(schema, &draft, &candidate) {
        tracing::warn!(
            entity_type = R::entity_type(),
            fields = ?err.field_names(),
            "create rejected"
        );
        return Err(err.into());
    }

    let mut records = collection.to_vec();
    records.push(candidate.clone());
    tracing::debug!(entity_type = R::entity_type(), id = %id, "record created");

    Ok(Created {
        collection: Collection::from_unique(records),
        record: candidate,
    })
}

/// Merge the fields present in `patch` into the record with identity `id`
///
/// An empty patch returns the collection as is, timestamps included.
pub fn update<R: Record>(
    collection: &Collection<R>,
    id: &R::Id,
    patch: R::Patch,
    schema: &EntitySchema,
    now: DateTime<Utc>,
) -> ConsoleResult<Collection<R>> {
    let Some(index) = collection.position(id) else {
        tracing::warn!(entity_type = R::entity_type(), id = %id, "update of unknown record");
        return Err(EntityError::not_found(R::entity_type(), id).into());
    };

    if patch.is_empty() {
        return Ok(collection.clone());
    }

    let mut records = collection.to_vec();
    let mut merged = records[index].clone();
    patch.apply_to(&mut merged);

    if let Err(err) = validate_update(schema, &merged) {
        tracing::warn!(
            entity_type = R::entity_type(),
            id = %id,
            fields = ?err.field_names(),
            "update rejected"
        );
        return Err(err.into());
    }

    merged.touch(now);
    records[index] = merged;
    tracing::debug!(entity_type = R::entity_type(), id = %id, "record updated");

    Ok(Collection::from_unique(records))
}

/// Remove the record with identity `id`; an unknown identity is a no-op
pub fn delete<R: Record>(collection: &Collection<R>, id: &R::Id) -> Collection<R> {
    let Some(index) = collection.position(id) else {
        tracing::debug!(entity_type = R::entity_type(), id = %id, "delete of unknown record ignored");
        return collection.clone();
    };

    let mut records = collection.to_vec();
    records.remove(index);
    tracing::debug!(entity_type = R::entity_type(), id = %id, "record deleted");

    Collection::from_unique(records)
}
