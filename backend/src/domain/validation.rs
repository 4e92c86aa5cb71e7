//! Field-level validation rules shared by every record type.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Longest accepted free-text field
pub const MAX_TEXT_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },
    #[error("{field} is too long (max {max} characters)")]
    FieldTooLong { field: &'static str, max: usize },
    #[error("{field} must be a decimal number, got {value:?}")]
    InvalidAmount { field: &'static str, value: String },
    #[error("{field} cannot be negative")]
    NegativeAmount { field: &'static str },
    #[error("{field} must be a date in YYYY-MM-DD format, got {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("month must be in YYYY-MM format, got {0:?}")]
    InvalidMonth(String),
    #[error("currency must be a three-letter code, got {0:?}")]
    InvalidCurrency(String),
    #[error("recurring bill {0} does not exist")]
    UnknownBill(String),
    #[error("{0} is too large to total")]
    AmountOverflow(&'static str),
}

pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    limit_text(field, value)
}

/// Optional text may be empty but is still length-limited
pub fn limit_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::FieldTooLong { field, max: MAX_TEXT_LEN });
    }
    Ok(())
}

pub fn optional_text(field: &'static str, value: Option<&str>) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| limit_text(field, v))
}

/// Parse a non-negative decimal amount
pub fn parse_amount(field: &'static str, value: &str) -> Result<Decimal, ValidationError> {
    let amount = Decimal::from_str(value).map_err(|_| ValidationError::InvalidAmount {
        field,
        value: value.to_string(),
    })?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field });
    }
    Ok(amount)
}

pub fn optional_amount(field: &'static str, value: Option<&str>) -> Result<Option<Decimal>, ValidationError> {
    value.map(|v| parse_amount(field, v)).transpose()
}

/// Parse a calendar date written exactly as `YYYY-MM-DD`
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate { field, value: value.to_string() };
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid())
}

pub fn optional_date(field: &'static str, value: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    value.map(|v| parse_date(field, v)).transpose()
}

/// Validate a `YYYY-MM` month filter
pub fn parse_month(value: &str) -> Result<(), ValidationError> {
    if value.len() != 7 {
        return Err(ValidationError::InvalidMonth(value.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidMonth(value.to_string()))
}

pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrency(value.to_string()))
    }
}
