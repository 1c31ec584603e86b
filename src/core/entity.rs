//! Record traits defining the core abstraction for every console collection

use crate::core::field::FieldValue;
use crate::core::predicate::Tab;
use crate::core::schema::EntitySchema;
use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::hash::Hash;
use uuid::Uuid;

/// Identity of a record, unique within its collection
///
/// Implementations decide how a fresh identity is derived from the ones
/// already in use. Identities are assigned once at creation and never
/// reassigned.
pub trait Identity:
    Clone + Eq + Hash + Debug + Display + Into<FieldValue> + Send + Sync + 'static
{
    /// Produce an identity that none of `existing` uses, `None` when the
    /// identity space is exhausted
    fn next_after<'a, I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
        Self: 'a;
}

/// Integer identities continue from the highest one in use (`max + 1`)
impl Identity for i64 {
    fn next_after<'a, I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        existing.into_iter().copied().max().unwrap_or(0).checked_add(1)
    }
}

/// UUID identities are random v4 values
impl Identity for Uuid {
    fn next_after<'a, I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let taken: std::collections::HashSet<&Uuid> = existing.into_iter().collect();
        loop {
            let candidate = Uuid::new_v4();
            if !taken.contains(&candidate) {
                return Some(candidate);
            }
        }
    }
}

/// Base trait for every record kept in a console collection.
///
/// A record has:
/// - an identity, assigned at creation
/// - created_at / updated_at timestamps, stamped by the mutation engine
/// - named fields readable through [`Record::field_value`]
///
/// Concrete records are declared with [`define_record!`](crate::define_record),
/// which also generates the matching [`Patch`] type.
pub trait Record: Clone + Debug + Send + Sync + 'static {
    /// Identity type of this record
    type Id: Identity;

    /// Partial record used as create payload and update patch
    type Patch: Patch<Self>;

    /// Entity type name (e.g., "album", "transaction")
    fn entity_type() -> &'static str;

    /// Get the identity of this record
    fn id(&self) -> &Self::Id;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Built-in schema: searchable, categorical and required fields
    fn schema() -> EntitySchema;

    /// View tabs partitioning this collection
    fn tabs() -> Vec<Tab<Self>>;

    /// Build a record from a validated draft
    ///
    /// Fields absent from the draft take their default value.
    fn from_draft(id: Self::Id, draft: Self::Patch, now: DateTime<Utc>) -> Self;

    /// Stamp the update timestamp
    fn touch(&mut self, now: DateTime<Utc>);
}

/// Partial record: every field optional
pub trait Patch<R>: Clone + Debug + Default + Send + Sync + 'static {
    /// True when no field is set
    fn is_empty(&self) -> bool;

    /// Value of a field set in this patch, `None` when absent
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Overwrite the fields present in this patch, keep all others
    fn apply_to(self, record: &mut R);
}
