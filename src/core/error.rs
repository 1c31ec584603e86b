//! Typed error handling for the console engine
//!
//! Every failure the engine can produce is a value of [`ConsoleError`], so the
//! presentation layer can match on it and render an operator notification
//! instead of dealing with a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`ValidationError`]: payload rejected on create/update, bad sort expression
//! - [`EntityError`]: identity lookups that failed, duplicate identities
//! - [`ConfigError`]: console configuration parsing and validation
//! - [`StorageError`]: repository backends
//!
//! Degenerate aggregates (division by zero) are not errors: the aggregation
//! engine answers them with sentinels.
//!
//! # Example
//!
//! ```rust,ignore
//! match view.update(&42, AlbumPatch::default().title("")) {
//!     Ok(()) => {}
//!     Err(ConsoleError::Validation(e)) => notify_warning(&e.to_string()),
//!     Err(ConsoleError::Entity(EntityError::NotFound { id, .. })) => notify_missing(&id),
//!     Err(e) => notify_error(&e.to_response()),
//! }
//! ```

use serde::Serialize;
use thiserror::Error;

/// The main error type of the console engine
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Entity-related errors (identity lookups)
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Error payload handed to the presentation layer for notifications
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ConsoleError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Entity(e) => e.error_code(),
            ConsoleError::Validation(e) => e.error_code(),
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// True for failures caused by the operator's input rather than the system
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConsoleError::Validation(_) | ConsoleError::Entity(EntityError::NotFound { .. })
        )
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ConsoleError::Entity(EntityError::NotFound { entity_type, id })
            | ConsoleError::Entity(EntityError::AlreadyExists { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id,
                }))
            }
            ConsoleError::Validation(ValidationError::FieldErrors { errors, .. }) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to record identities
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EntityError {
    /// No record with this identity exists in the collection
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: String },

    /// Two records share the same identity
    #[error("{entity_type} with id '{id}' already exists")]
    AlreadyExists { entity_type: String, id: String },

    /// Every identity after the highest one in use is out of range
    #[error("no {entity_type} identity left to assign")]
    IdentitiesExhausted { entity_type: String },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists(entity_type: &str, id: impl ToString) -> Self {
        EntityError::AlreadyExists {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }

    pub fn exhausted(entity_type: &str) -> Self {
        EntityError::IdentitiesExhausted {
            entity_type: entity_type.to_string(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
            EntityError::IdentitiesExhausted { .. } => "IDENTITIES_EXHAUSTED",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to input validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more fields of a payload were rejected
    #[error("invalid {entity_type}: {}", join_field_errors(.errors))]
    FieldErrors {
        entity_type: String,
        errors: Vec<FieldValidationError>,
    },

    /// Sort expression could not be parsed
    #[error("invalid sort expression '{expression}': expected 'field', 'field:asc' or 'field:desc'")]
    InvalidSort { expression: String },

    /// A categorical value outside its closed domain
    #[error("'{value}' is not a valid {domain}")]
    UnknownValue { domain: String, value: String },
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn fields(entity_type: &str, errors: Vec<FieldValidationError>) -> Self {
        ValidationError::FieldErrors {
            entity_type: entity_type.to_string(),
            errors,
        }
    }

    /// Names of the rejected fields, empty for non-field errors
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            ValidationError::FieldErrors { errors, .. } => {
                errors.iter().map(|e| e.field.as_str()).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors { .. } => "VALIDATION_ERROR",
            ValidationError::InvalidSort { .. } => "INVALID_SORT",
            ValidationError::UnknownValue { .. } => "UNKNOWN_VALUE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("failed to parse config{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("invalid value '{value}' for '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_ref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to repository backends
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StorageError {
    /// A writer panicked while holding the collection lock
    #[error("{backend} lock poisoned: {message}")]
    LockPoisoned { backend: String, message: String },

    /// Backend not available
    #[error("storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConsoleError {
    fn from(err: serde_yaml::Error) -> Self {
        ConsoleError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(err: std::io::Error) -> Self {
        ConsoleError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for console engine operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;
