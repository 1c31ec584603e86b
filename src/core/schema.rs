//! Schema descriptors: which fields are searchable, categorical and required

use crate::core::field::{FieldFormat, FieldValue};
use crate::core::query::PageIndexing;
use crate::core::validation::validators;
use serde::{Deserialize, Serialize};

/// Describes one entity type to the engine
///
/// Every record type ships a built-in schema (see
/// [`Record::schema`](crate::core::entity::Record::schema)); configuration
/// can override parts of it per console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySchema {
    /// Entity type name (e.g., "album")
    pub entity_type: String,

    /// Fields matched by the text search (OR across fields)
    #[serde(default)]
    pub searchable: Vec<String>,

    /// Fields offered as categorical filters
    #[serde(default)]
    pub categorical: Vec<String>,

    /// Fields that must be present and non-blank on create and update
    #[serde(default)]
    pub required: Vec<String>,

    /// Field used by date-range filters and time-bucketed trends
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_field: Option<String>,

    /// Additional per-field validation rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FieldRule>,

    /// Page size of list views over this entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    /// Page numbering convention of list views over this entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing: Option<PageIndexing>,
}

impl EntitySchema {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            searchable: Vec::new(),
            categorical: Vec::new(),
            required: Vec::new(),
            date_field: None,
            rules: Vec::new(),
            page_size: None,
            indexing: None,
        }
    }

    pub fn with_rule(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_indexing(mut self, indexing: PageIndexing) -> Self {
        self.indexing = Some(indexing);
        self
    }

    pub fn is_searchable(&self, field: &str) -> bool {
        self.searchable.iter().any(|f| f == field)
    }

    pub fn is_categorical(&self, field: &str) -> bool {
        self.categorical.iter().any(|f| f == field)
    }

    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|f| f == field)
    }
}

/// Validation rule attached to one field
///
/// ```yaml
/// rules:
///   - field: email
///     email: true
///   - field: title
///     max_length: 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub positive: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub email: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
}

impl FieldRule {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            ..Self::default()
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn positive(mut self) -> Self {
        self.positive = true;
        self
    }

    pub fn max_value(mut self, max: f64) -> Self {
        self.max_value = Some(max);
        self
    }

    pub fn length(mut self, min: usize, max: usize) -> Self {
        self.min_length = Some(min);
        self.max_length = Some(max);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn one_of<S: Into<String>>(mut self, allowed: impl IntoIterator<Item = S>) -> Self {
        self.one_of = Some(allowed.into_iter().map(Into::into).collect());
        self
    }

    /// Check a value, returning every violated constraint's message
    pub fn check(&self, value: &FieldValue) -> Vec<String> {
        let field = self.field.as_str();
        let mut outcomes = Vec::new();

        if self.required {
            outcomes.push(validators::required()(field, value));
        }
        if value.is_blank() {
            // Optional empty values skip the format rules
            return outcomes.into_iter().filter_map(Result::err).collect();
        }
        if self.positive {
            outcomes.push(validators::positive()(field, value));
        }
        if let Some(max) = self.max_value {
            outcomes.push(validators::max_value(max)(field, value));
        }
        if self.min_length.is_some() || self.max_length.is_some() {
            let min = self.min_length.unwrap_or(0);
            let max = self.max_length.unwrap_or(usize::MAX);
            outcomes.push(validators::string_length(min, max)(field, value));
        }
        if self.email {
            outcomes.push(validators::format(FieldFormat::Email)(field, value));
        }
        if let Some(allowed) = &self.one_of {
            outcomes.push(validators::in_list(allowed.clone())(field, value));
        }

        outcomes.into_iter().filter_map(Result::err).collect()
    }
}
