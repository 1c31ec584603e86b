//! Payload validation for the mutation engine
//!
//! A create payload must carry every required field with a non-blank value;
//! after the record is built (or a patch merged), the schema's field rules
//! run against the resulting record.

pub mod validators;

use crate::core::entity::{Patch, Record};
use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::field::FieldValue;
use crate::core::schema::EntitySchema;

/// Validate a create payload and the record built from it
pub fn validate_create<R: Record>(
    schema: &EntitySchema,
    draft: &R::Patch,
    candidate: &R,
) -> Result<(), ValidationError> {
    let mut errors = required_errors(schema, |field| draft.field_value(field));
    errors.extend(rule_errors(schema, candidate, &errors));
    finish::<R>(errors)
}

/// Validate a record after a patch was merged into it
pub fn validate_update<R: Record>(schema: &EntitySchema, merged: &R) -> Result<(), ValidationError> {
    let mut errors = required_errors(schema, |field| merged.field_value(field));
    errors.extend(rule_errors(schema, merged, &errors));
    finish::<R>(errors)
}

fn required_errors(
    schema: &EntitySchema,
    lookup: impl Fn(&str) -> Option<FieldValue>,
) -> Vec<FieldValidationError> {
    let check = validators::required();
    schema
        .required
        .iter()
        .filter_map(|field| {
            let value = lookup(field).unwrap_or(FieldValue::Null);
            check(field, &value)
                .err()
                .map(|message| FieldValidationError::new(field.as_str(), message))
        })
        .collect()
}

fn rule_errors<R: Record>(
    schema: &EntitySchema,
    record: &R,
    already_rejected: &[FieldValidationError],
) -> Vec<FieldValidationError> {
    schema
        .rules
        .iter()
        .filter(|rule| !already_rejected.iter().any(|e| e.field == rule.field))
        .flat_map(|rule| {
            let value = record.field_value(&rule.field).unwrap_or(FieldValue::Null);
            rule.check(&value)
                .into_iter()
                .map(|message| FieldValidationError::new(rule.field.as_str(), message))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn finish<R: Record>(errors: Vec<FieldValidationError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::fields(R::entity_type(), errors))
    }
}
