//! # Field Coercion
//!
//! Pulls typed values out of an untyped JSON request body. Every failure names
//! the offending field so it can be reported back to the client.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use thiserror::Error;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Client input that cannot become a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl ValidationError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub(crate) fn object(body: &Value) -> ValidationResult<&Map<String, Value>> {
    body.as_object().ok_or(ValidationError::NotAnObject)
}

/// Present and non-null
fn required<'a>(obj: &'a Map<String, Value>, field: &'static str) -> ValidationResult<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

pub(crate) fn string(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<String> {
    match required(obj, field)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(ValidationError::invalid(field, "expected a string")),
    }
}

pub(crate) fn optional_string(
    obj: &Map<String, Value>,
    field: &'static str,
) -> ValidationResult<Option<String>> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ValidationError::invalid(field, "expected a string")),
    }
}

/// Non-negative decimal from a JSON number or a numeric string
pub(crate) fn amount(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<Decimal> {
    let text = match required(obj, field)? {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return Err(ValidationError::invalid(field, "expected a number")),
    };
    let value = parse_decimal(&text)
        .ok_or_else(|| ValidationError::invalid(field, format!("'{}' is not a number", text)))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::invalid(field, "must not be negative"));
    }
    Ok(value.normalize())
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Integer from a JSON integer or an integer string
pub(crate) fn integer(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<i32> {
    match required(obj, field)? {
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| ValidationError::invalid(field, format!("'{}' is not an integer", n))),
        Value::String(s) => s
            .trim()
            .parse::<i32>()
            .map_err(|_| ValidationError::invalid(field, format!("'{}' is not an integer", s))),
        _ => Err(ValidationError::invalid(field, "expected an integer")),
    }
}

pub(crate) fn date(obj: &Map<String, Value>, field: &'static str) -> ValidationResult<NaiveDate> {
    let text = string(obj, field)?;
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ValidationError::invalid(field, format!("'{}' is not a YYYY-MM-DD date", text)))
}
