//! Configuration loading and management
//!
//! A console configuration sets list defaults and overrides parts of the
//! built-in schema of each record type:
//!
//! ```yaml
//! defaults:
//!   page_size: 12
//!   indexing: one_based
//! entities:
//!   - entity_type: album
//!     searchable: [title, artist]
//!     required: [title, artist, genre]
//!     rules:
//!       - field: title
//!         max_length: 120
//! ```

use crate::core::entity::Record;
use crate::core::error::{ConfigError, ConsoleResult};
use crate::core::query::{PageIndexing, DEFAULT_PAGE_SIZE};
use crate::core::schema::{EntitySchema, FieldRule};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults applied to every list view
///
/// Unset values fall back to the built-in page size and indexing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDefaults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing: Option<PageIndexing>,
}

impl ListDefaults {
    pub fn page_size(&self) -> usize {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn indexing(&self) -> PageIndexing {
        self.indexing.unwrap_or_default()
    }

    fn merge_from(&mut self, other: ListDefaults) {
        self.page_size = other.page_size.or(self.page_size);
        self.indexing = other.indexing.or(self.indexing);
    }
}

/// Per-entity override of the built-in schema
///
/// Absent fields keep the built-in value; `rules` are added to the built-in ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityOverride {
    /// Entity type name (e.g., "album")
    pub entity_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexing: Option<PageIndexing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub searchable: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categorical: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_field: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<FieldRule>,
}

impl EntityOverride {
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            ..Self::default()
        }
    }

    /// Lay this override over `schema`
    pub fn apply_to(&self, schema: &mut EntitySchema) {
        if let Some(page_size) = self.page_size {
            schema.page_size = Some(page_size);
        }
        if let Some(indexing) = self.indexing {
            schema.indexing = Some(indexing);
        }
        if let Some(searchable) = &self.searchable {
            schema.searchable = searchable.clone();
        }
        if let Some(categorical) = &self.categorical {
            schema.categorical = categorical.clone();
        }
        if let Some(required) = &self.required {
            schema.required = required.clone();
        }
        if let Some(date_field) = &self.date_field {
            schema.date_field = Some(date_field.clone());
        }
        schema.rules.extend(self.rules.iter().cloned());
    }
}

/// Complete configuration of a console
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub defaults: ListDefaults,

    #[serde(default)]
    pub entities: Vec<EntityOverride>,
}

impl ConsoleConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config
            .validate()
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> ConsoleResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Combine configurations; later ones win
    ///
    /// Defaults and overrides of the same entity type are laid over each
    /// other in order, so a later configuration replaces only the settings
    /// it names.
    pub fn merge(configs: Vec<ConsoleConfig>) -> Self {
        let mut defaults = ListDefaults::default();
        let mut entities: IndexMap<String, EntityOverride> = IndexMap::new();

        for config in configs {
            defaults.merge_from(config.defaults);
            for incoming in config.entities {
                match entities.get_mut(&incoming.entity_type) {
                    Some(existing) => existing.merge_from(incoming),
                    None => {
                        entities.insert(incoming.entity_type.clone(), incoming);
                    }
                }
            }
        }

        Self {
            defaults,
            entities: entities.into_values().collect(),
        }
    }

    /// Override for one entity type
    pub fn entity(&self, entity_type: &str) -> Option<&EntityOverride> {
        self.entities.iter().find(|e| e.entity_type == entity_type)
    }

    /// Effective schema of `R`: built-in schema, list defaults, then override
    pub fn schema_for<R: Record>(&self) -> EntitySchema {
        let mut schema = R::schema();
        schema.page_size.get_or_insert(self.defaults.page_size());
        schema.indexing.get_or_insert(self.defaults.indexing());
        if let Some(entity) = self.entity(R::entity_type()) {
            entity.apply_to(&mut schema);
        }
        schema
    }

    /// Check values that would make list views or rules meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.page_size == Some(0) {
            return Err(invalid("defaults.page_size", "0", "page size must be at least 1"));
        }
        for entity in &self.entities {
            if entity.entity_type.trim().is_empty() {
                return Err(invalid("entities.entity_type", "", "entity type must not be empty"));
            }
            if entity.page_size == Some(0) {
                return Err(invalid(
                    &format!("entities.{}.page_size", entity.entity_type),
                    "0",
                    "page size must be at least 1",
                ));
            }
            for rule in &entity.rules {
                validate_rule(&entity.entity_type, rule)?;
            }
        }
        Ok(())
    }
}

impl EntityOverride {
    fn merge_from(&mut self, other: EntityOverride) {
        self.page_size = other.page_size.or(self.page_size);
        self.indexing = other.indexing.or(self.indexing);
        self.searchable = other.searchable.or(self.searchable.take());
        self.categorical = other.categorical.or(self.categorical.take());
        self.required = other.required.or(self.required.take());
        self.date_field = other.date_field.or(self.date_field.take());
        self.rules.extend(other.rules);
    }
}

fn validate_rule(entity_type: &str, rule: &FieldRule) -> Result<(), ConfigError> {
    let field = format!("entities.{}.rules.{}", entity_type, rule.field);
    if rule.field.trim().is_empty() {
        return Err(invalid(&field, "", "rule must name a field"));
    }
    if let (Some(min), Some(max)) = (rule.min_length, rule.max_length)
        && min > max
    {
        return Err(invalid(
            &field,
            &format!("{min}..{max}"),
            "min_length must not exceed max_length",
        ));
    }
    if let Some(max) = rule.max_value
        && !max.is_finite()
    {
        return Err(invalid(&field, &max.to_string(), "max_value must be finite"));
    }
    Ok(())
}

fn invalid(field: &str, value: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        message: message.to_string(),
    }
}
