//! Form definitions backing the dashboard routes.
//!
//! HTML forms post every field as text. The helpers here turn blank inputs
//! into `None` and parse dates, amounts and enums into domain values.

use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::{Amount, RecordId, TypeConstraintError};

pub mod auth;
pub mod clients;
pub mod deliverables;
pub mod events;
pub mod payments;
pub mod special_requests;
pub mod tasks;
pub mod transfer;
pub mod vendors;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{0} must be a date in YYYY-MM-DD format")]
    InvalidDate(&'static str),

    #[error("{0} must be a non-negative number")]
    InvalidAmount(&'static str),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid url")]
    InvalidUrl,

    #[error("invalid {field}: {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

/// Trimmed text, `None` when blank.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Trimmed text that must not be blank.
pub(crate) fn required_text(value: &str, field: &'static str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(trimmed.to_string())
}

/// Non-blank reference to another record.
pub(crate) fn required_reference(value: &str, field: &'static str) -> Result<RecordId, FormError> {
    RecordId::new(value).map_err(|_| FormError::Missing(field))
}

pub(crate) fn optional_reference(value: Option<&str>) -> Option<RecordId> {
    value.and_then(|value| RecordId::new(value).ok())
}

pub(crate) fn optional_date(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<NaiveDate>, FormError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError::InvalidDate(field)),
        None => Ok(None),
    }
}

pub(crate) fn required_date(value: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    optional_date(Some(value), field)?.ok_or(FormError::Missing(field))
}

/// Blank amounts count as zero.
pub(crate) fn amount(value: Option<&str>, field: &'static str) -> Result<Amount, FormError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => text
            .parse::<f64>()
            .ok()
            .and_then(|value| Amount::new(value).ok())
            .ok_or(FormError::InvalidAmount(field)),
        None => Ok(Amount::ZERO),
    }
}

/// Parses a closed enum, falling back to its default when the field is blank.
pub(crate) fn choice<T>(value: Option<&str>, field: &'static str, default: T) -> Result<T, FormError>
where
    T: FromStr<Err = TypeConstraintError>,
{
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => text.parse().map_err(|err: TypeConstraintError| FormError::InvalidValue {
            field,
            message: err.to_string(),
        }),
        None => Ok(default),
    }
}
