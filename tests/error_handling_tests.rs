//! Tests for the typed error handling system
//!
//! These tests verify that:
//! - Errors carry stable codes for the presentation layer
//! - Error responses are properly formatted
//! - Error conversions work correctly
//! - Error matching allows callers to handle specific cases

use backstage::entities::genre::{Genre, GenrePatch};
use backstage::prelude::*;

// =============================================================================
// Error Code Tests
// =============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_entity_error_codes() {
        let err = ConsoleError::Entity(EntityError::not_found("album", 7));
        assert_eq!(err.error_code(), "ENTITY_NOT_FOUND");

        let err = ConsoleError::Entity(EntityError::already_exists("album", 7));
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");

        let err = ConsoleError::Entity(EntityError::exhausted("album"));
        assert_eq!(err.error_code(), "IDENTITIES_EXHAUSTED");
        assert_eq!(err.to_string(), "no album identity left to assign");
    }

    #[test]
    fn test_validation_error_codes() {
        let err: ConsoleError = ValidationError::fields(
            "artist",
            vec![FieldValidationError::new("name", "is required")],
        )
        .into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");

        let err: ConsoleError = "plays:sideways".parse::<SortSpec>().unwrap_err().into();
        assert_eq!(err.error_code(), "INVALID_SORT");

        let err: ConsoleError = "polka".parse::<backstage::entities::MusicGenre>().unwrap_err().into();
        assert_eq!(err.error_code(), "UNKNOWN_VALUE");
    }

    #[test]
    fn test_config_and_storage_codes() {
        let err = ConsoleError::Config(ConfigError::FileNotFound {
            path: "console.yaml".to_string(),
        });
        assert_eq!(err.error_code(), "CONFIG_ERROR");

        let err = ConsoleError::Storage(StorageError::Unavailable {
            backend: "remote".to_string(),
        });
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }
}

// =============================================================================
// Error Response Tests
// =============================================================================

mod response_tests {
    use super::*;

    #[test]
    fn test_not_found_response_carries_identity() {
        let response = ConsoleError::Entity(EntityError::not_found("track", 42)).to_response();
        assert_eq!(response.code, "ENTITY_NOT_FOUND");
        assert_eq!(response.message, "track with id '42' not found");
        assert_eq!(
            response.details,
            Some(serde_json::json!({ "entity_type": "track", "id": "42" }))
        );
    }

    #[test]
    fn test_validation_response_lists_fields() {
        let mut view = ListView::new(Genre::schema(), Collection::<Genre>::new());
        let err = view.create(GenrePatch::default()).unwrap_err();
        let response = err.to_response();

        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.unwrap();
        assert_eq!(details["fields"][0]["field"], "name");
    }

    #[test]
    fn test_response_serializes_without_empty_details() {
        let response = ConsoleError::Storage(StorageError::Unavailable {
            backend: "remote".to_string(),
        })
        .to_response();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }
}

// =============================================================================
// Conversion and Matching Tests
// =============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_yaml_error_converts_to_config_error() {
        let err = ConsoleConfig::from_yaml_str("defaults: [").unwrap_err();
        assert!(matches!(err, ConsoleError::Config(ConfigError::ParseError { file: None, .. })));
    }

    #[test]
    fn test_update_of_unknown_record_is_not_found() {
        let mut view = ListView::new(Genre::schema(), Collection::<Genre>::new());
        let err = view.update(&3, GenrePatch::default().name("Funk")).unwrap_err();

        assert!(err.is_user_error());
        match err {
            ConsoleError::Entity(EntityError::NotFound { entity_type, id }) => {
                assert_eq!(entity_type, "genre");
                assert_eq!(id, "3");
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_sort_leaves_previous_sort() {
        let mut view = ListView::new(Genre::schema(), Collection::<Genre>::new());
        view.set_sort("name:desc").unwrap();
        assert!(view.set_sort(":asc").is_err());
        assert_eq!(view.filter().sort, Some(SortSpec::desc("name")));
    }
}
