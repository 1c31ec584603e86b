//! Predicate library: one record against one criterion
//!
//! Every predicate is pure and total. A missing field never panics: it reads
//! as the empty string for text search and as "no match" for categorical,
//! date and numeric criteria.

use crate::core::entity::Record;
use crate::core::error::ValidationError;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted by [`CategoryFilter`] parsing to mean "inactive"
pub const ALL: &str = "all";

/// Categorical filter value: inactive, or one concrete domain value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Value(String),
}

impl CategoryFilter {
    pub fn is_active(&self) -> bool {
        !matches!(self, CategoryFilter::All)
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Value(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        CategoryFilter::from(value.as_str())
    }
}

/// View tab: a named subset defined by a derived boolean condition
pub struct Tab<R> {
    pub key: String,
    pub label: String,
    condition: fn(&R) -> bool,
}

impl<R> Tab<R> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, condition: fn(&R) -> bool) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            condition,
        }
    }

    /// The unscoped tab, every record belongs to it
    pub fn all() -> Self {
        Self::new(ALL, "All", |_| true)
    }

    pub fn contains(&self, record: &R) -> bool {
        (self.condition)(record)
    }
}

impl<R> Clone for Tab<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            condition: self.condition,
        }
    }
}

impl<R> fmt::Debug for Tab<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("key", &self.key)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Relative date window ending today
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
}

impl DateRange {
    /// Days reaching back from today, `None` when inactive
    pub fn offset_days(self) -> Option<u64> {
        match self {
            DateRange::All => None,
            DateRange::Today => Some(0),
            DateRange::Yesterday => Some(1),
            DateRange::Last7Days => Some(7),
            DateRange::Last30Days => Some(30),
        }
    }

    pub fn is_active(self) -> bool {
        self.offset_days().is_some()
    }

    /// Whether `date` falls in `[today - offset, today]`
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self.offset_days() {
            None => true,
            Some(offset) => {
                let start = today.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
                start <= date && date <= today
            }
        }
    }
}

impl FromStr for DateRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateRange::All),
            "today" => Ok(DateRange::Today),
            "yesterday" => Ok(DateRange::Yesterday),
            "7d" | "last_7_days" => Ok(DateRange::Last7Days),
            "30d" | "last_30_days" => Ok(DateRange::Last30Days),
            other => Err(ValidationError::UnknownValue {
                domain: "date range".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Inclusive bounds on a numeric field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub field: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            field: field.into(),
            min,
            max,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// Case-insensitive substring match, OR across `fields`
///
/// An empty or whitespace-only term matches every record.
pub fn matches_text<R: Record>(record: &R, fields: &[String], term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    matches_normalized_text(record, fields, &needle)
}

/// [`matches_text`] with a term already trimmed and lowercased
pub(crate) fn matches_normalized_text<R: Record>(record: &R, fields: &[String], needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        record
            .field_value(field)
            .map(|v| v.to_text().to_lowercase())
            .unwrap_or_default()
            .contains(needle)
    })
}

/// Exact equality of the field's text form, or inactive filter
pub fn matches_category<R: Record>(record: &R, field: &str, filter: &CategoryFilter) -> bool {
    match filter {
        CategoryFilter::All => true,
        CategoryFilter::Value(expected) => record
            .field_value(field)
            .is_some_and(|v| !v.is_null() && v.to_text() == *expected),
    }
}

/// Membership in a view tab
pub fn matches_tab<R>(record: &R, tab: &Tab<R>) -> bool {
    tab.contains(record)
}

/// Date field within a relative window ending at `today`
pub fn matches_date_range<R: Record>(
    record: &R,
    field: &str,
    range: DateRange,
    today: NaiveDate,
) -> bool {
    if !range.is_active() {
        return true;
    }
    record
        .field_value(field)
        .and_then(|v| v.as_date())
        .is_some_and(|date| range.contains(date, today))
}

/// Numeric field within inclusive bounds
pub fn matches_numeric_range<R: Record>(record: &R, range: &NumericRange) -> bool {
    record
        .field_value(&range.field)
        .and_then(|v| v.as_f64())
        .is_some_and(|value| range.contains(value))
}
