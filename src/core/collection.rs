//! Authoritative record collections
//!
//! A [`Collection`] is an immutable value: the mutation engine never edits one
//! in place, it builds a new collection and hands it back. Cloning is cheap
//! (the records sit behind an `Arc`), so views can hold on to an old
//! collection while the caller moves on to the new one.

use crate::core::entity::Record;
use crate::core::error::{ConsoleResult, EntityError};
use std::collections::HashSet;
use std::sync::Arc;

/// Ordered sequence of records with unique identities
#[derive(Debug)]
pub struct Collection<R> {
    records: Arc<Vec<R>>,
}

impl<R> Clone for Collection<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: PartialEq> PartialEq for Collection<R> {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Arc::new(Vec::new()),
        }
    }
}

impl<R: Record> Collection<R> {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection, rejecting duplicate identities
    pub fn from_records(records: Vec<R>) -> ConsoleResult<Self> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id()) {
                return Err(EntityError::already_exists(R::entity_type(), record.id()).into());
            }
        }
        Ok(Self::from_unique(records))
    }

    /// Callers guarantee identities are unique
    pub(crate) fn from_unique(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &R::Id) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &R::Id) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &R::Id> {
        self.records.iter().map(Record::id)
    }

    pub fn to_vec(&self) -> Vec<R> {
        self.records.as_ref().clone()
    }

    /// Whether both values share the same underlying storage
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
