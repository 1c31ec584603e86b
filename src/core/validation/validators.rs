//! Reusable field validators
//!
//! These validators back [`FieldRule`](crate::core::schema::FieldRule) and the
//! required-field check of the mutation engine.

use crate::core::field::{FieldFormat, FieldValue};

/// Validator: field is present and not blank
pub fn required() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &FieldValue| {
        if value.is_blank() {
            Err("is required".to_string())
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be finite and positive
pub fn positive() -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, value: &FieldValue| match value.as_f64() {
        Some(num) if !num.is_finite() => Err(format!("must be a finite number (got {})", num)),
        Some(num) if num <= 0.0 => Err(format!("must be positive (got {})", num)),
        _ => Ok(()),
    }
}

/// Validator: string length must be within range (counted in characters)
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| {
        let Some(s) = value.as_string() else {
            return Ok(());
        };
        let len = s.chars().count();
        if len < min {
            Err(format!("must be at least {} characters (got {})", min, len))
        } else if len > max {
            Err(format!("must be at most {} characters (got {})", max, len))
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be finite and not exceed maximum
pub fn max_value(
    max: f64,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| match value.as_f64() {
        Some(num) if !num.is_finite() => Err(format!("must be a finite number (got {})", num)),
        Some(num) if num > max => Err(format!("must not exceed {} (got {})", max, num)),
        _ => Ok(()),
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: Vec<String>,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| {
        let Some(s) = value.as_string() else {
            return Ok(());
        };
        if allowed.iter().any(|a| a == s) {
            Ok(())
        } else {
            Err(format!("must be one of {:?} (got '{}')", allowed, s))
        }
    }
}

/// Validator: string must match a format
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &FieldValue) -> Result<(), String> + Send + Sync + Clone {
    move |_: &str, value: &FieldValue| {
        if value.as_string().is_none() || format.validate(value) {
            Ok(())
        } else {
            Err(format!("has an invalid format ('{}')", value.to_text()))
        }
    }
}
