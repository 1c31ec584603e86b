//! Filter state and the composer that applies it to a collection

use crate::core::entity::Record;
use crate::core::error::ValidationError;
use crate::core::predicate::{
    matches_category, matches_date_range, matches_normalized_text, matches_numeric_range,
    matches_tab, CategoryFilter, DateRange, NumericRange, Tab,
};
use crate::core::schema::EntitySchema;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort expression: `field`, `field:asc` or `field:desc`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Stable sort; records without a comparable value go last in either direction
    ///
    /// A NaN counts as no value.
    pub fn sort<R: Record>(&self, records: &mut [R]) {
        let sort_key = |record: &R| {
            record
                .field_value(&self.field)
                .filter(|v| !v.is_null() && !v.as_f64().is_some_and(f64::is_nan))
        };
        records.sort_by(|a, b| {
            let left = sort_key(a);
            let right = sort_key(b);
            match (left, right) {
                (Some(l), Some(r)) => {
                    let ord = l.compare(&r).unwrap_or(Ordering::Equal);
                    match self.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                }
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        });
    }
}

impl FromStr for SortSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidSort {
            expression: s.to_string(),
        };
        let (field, direction) = match s.split_once(':') {
            None => (s, SortDirection::Asc),
            Some((field, "asc")) => (field, SortDirection::Asc),
            Some((field, "desc")) => (field, SortDirection::Desc),
            Some(_) => return Err(invalid()),
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            field: field.to_string(),
            direction,
        })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            SortDirection::Asc => write!(f, "{}:asc", self.field),
            SortDirection::Desc => write!(f, "{}:desc", self.field),
        }
    }
}

/// Current filter criteria of one list view
///
/// Starts with every criterion inactive. Categorical filters keep the order
/// in which they were first set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub categories: IndexMap<String, CategoryFilter>,
    #[serde(default)]
    pub tab: Option<String>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub numeric_ranges: Vec<NumericRange>,
    #[serde(default)]
    pub sort: Option<SortSpec>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_category(mut self, field: impl Into<String>, value: impl Into<CategoryFilter>) -> Self {
        self.set_category(field, value);
        self
    }

    pub fn with_tab(mut self, key: impl Into<String>) -> Self {
        self.tab = Some(key.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    pub fn with_numeric_range(mut self, range: NumericRange) -> Self {
        self.numeric_ranges.push(range);
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set a categorical filter; `all` removes it
    pub fn set_category(&mut self, field: impl Into<String>, value: impl Into<CategoryFilter>) {
        let field = field.into();
        match value.into() {
            CategoryFilter::All => {
                self.categories.shift_remove(&field);
            }
            active => {
                self.categories.insert(field, active);
            }
        }
    }

    pub fn category(&self, field: &str) -> &CategoryFilter {
        const INACTIVE: &CategoryFilter = &CategoryFilter::All;
        self.categories.get(field).unwrap_or(INACTIVE)
    }

    /// True when no criterion narrows the collection (sorting aside)
    pub fn is_inactive(&self) -> bool {
        self.search.trim().is_empty()
            && self.categories.values().all(|c| !c.is_active())
            && self.tab.as_deref().is_none_or(|t| t == crate::core::predicate::ALL)
            && !self.date_range.is_active()
            && self.numeric_ranges.is_empty()
    }

    /// Reset every criterion, keep the sort
    pub fn clear(&mut self) {
        let sort = self.sort.take();
        *self = Self {
            sort,
            ..Self::default()
        };
    }
}

/// Applies a [`FilterState`] to records of one type
///
/// The composer holds the schema and tabs of a screen; it keeps no result
/// between calls, so every application reflects the records it is given.
#[derive(Debug, Clone)]
pub struct FilterComposer<R> {
    schema: EntitySchema,
    tabs: Vec<Tab<R>>,
}

impl<R: Record> FilterComposer<R> {
    pub fn new(schema: EntitySchema, tabs: Vec<Tab<R>>) -> Self {
        Self { schema, tabs }
    }

    /// Composer with the record type's built-in schema and tabs
    pub fn for_record() -> Self {
        Self::new(R::schema(), R::tabs())
    }

    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }

    pub fn tabs(&self) -> &[Tab<R>] {
        &self.tabs
    }

    pub fn tab(&self, key: &str) -> Option<&Tab<R>> {
        self.tabs.iter().find(|t| t.key == key)
    }

    pub fn apply(&self, records: &[R], state: &FilterState, today: NaiveDate) -> Vec<R> {
        apply_filters(records, &self.schema, &self.tabs, state, today)
    }
}

/// AND of every active criterion, then the optional sort
///
/// Relative input order is preserved among matches unless a sort is set.
/// An unknown tab key matches everything. An active date range on a schema
/// without a date field matches nothing.
pub fn apply_filters<R: Record>(
    records: &[R],
    schema: &EntitySchema,
    tabs: &[Tab<R>],
    state: &FilterState,
    today: NaiveDate,
) -> Vec<R> {
    let needle = state.search.trim().to_lowercase();

    let tab = state.tab.as_deref().and_then(|key| {
        let found = tabs.iter().find(|t| t.key == key);
        if found.is_none() && key != crate::core::predicate::ALL {
            tracing::warn!(
                entity_type = %schema.entity_type,
                tab = %key,
                "unknown tab, showing all records"
            );
        }
        found
    });

    let mut filtered: Vec<R> = records
        .iter()
        .filter(|record| matches_normalized_text(*record, &schema.searchable, &needle))
        .filter(|record| {
            state
                .categories
                .iter()
                .all(|(field, filter)| matches_category(*record, field, filter))
        })
        .filter(|record| tab.is_none_or(|t| matches_tab(*record, t)))
        .filter(|record| {
            if !state.date_range.is_active() {
                return true;
            }
            schema
                .date_field
                .as_deref()
                .is_some_and(|field| matches_date_range(*record, field, state.date_range, today))
        })
        .filter(|record| {
            state
                .numeric_ranges
                .iter()
                .all(|range| matches_numeric_range(*record, range))
        })
        .cloned()
        .collect();

    if let Some(sort) = &state.sort {
        sort.sort(&mut filtered);
    }

    filtered
}
