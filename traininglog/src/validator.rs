//! Field rules shared by the domain constructors
//!
//! Every function either returns the accepted value or a
//! `LogError::Validation` naming the field, the value and the reason.

use crate::error::LogError;
use crate::patterns::{compiled, Pattern};
use crate::LogResult;
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

/// Longest rest between two sets that is still considered a rest
pub const MAX_REST_INTERVAL_MINUTES: u32 = 15;

/// Accepted RPE bounds (inclusive)
pub const MIN_RPE: Decimal = Decimal::ONE;
pub const MAX_RPE: Decimal = Decimal::TEN;

static DATE_SHAPE: Pattern = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").ok());

pub fn require_positive(field: &str, value: u32) -> LogResult<u32> {
    if value == 0 {
        return Err(LogError::validation(field, value, "must be positive"));
    }
    Ok(value)
}

/// Non-negative count from signed external data
pub fn require_count(field: &str, value: i64) -> LogResult<u32> {
    if value < 0 {
        return Err(LogError::validation(field, value, "cannot be negative"));
    }
    u32::try_from(value).map_err(|_| LogError::validation(field, value, "is too large"))
}

/// Weight in kilograms; zero stands for bodyweight
pub fn require_weight(field: &str, weight: Decimal) -> LogResult<Decimal> {
    if weight.is_sign_negative() && !weight.is_zero() {
        return Err(LogError::validation(
            field,
            weight,
            "must be zero (bodyweight) or positive",
        ));
    }
    Ok(weight.normalize())
}

pub fn require_in_range(field: &str, value: u32, min: u32, max: u32) -> LogResult<u32> {
    if value < min || value > max {
        return Err(LogError::validation(
            field,
            value,
            format!("must be between {} and {}", min, max),
        ));
    }
    Ok(value)
}

pub fn require_non_empty(field: &str, value: &str) -> LogResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LogError::validation(field, "\"\"", "cannot be empty"));
    }
    Ok(trimmed.to_string())
}

/// Optional free text: blank strings collapse to `None`
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn require_rest_minutes(field: &str, minutes: u32) -> LogResult<u32> {
    if minutes > MAX_REST_INTERVAL_MINUTES {
        return Err(LogError::validation(
            field,
            minutes,
            format!("must be at most {} minutes", MAX_REST_INTERVAL_MINUTES),
        ));
    }
    Ok(minutes)
}

/// Parse a `YYYY-MM-DD` date, rejecting other layouts and impossible days
pub fn parse_date(field: &str, value: &str) -> LogResult<NaiveDate> {
    let value = value.trim();
    if !compiled(&DATE_SHAPE, "date")?.is_match(value) {
        return Err(LogError::validation(
            field,
            value,
            "must be formatted as YYYY-MM-DD",
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| LogError::validation(field, value, "is not a valid calendar date"))
}

/// RPE must lie in [1, 10] and be a whole or half step
pub fn validate_rpe(rpe: Decimal) -> LogResult<Decimal> {
    if rpe < MIN_RPE || rpe > MAX_RPE {
        return Err(LogError::validation(
            "rpe",
            rpe,
            format!("must be between {} and {}", MIN_RPE, MAX_RPE),
        ));
    }
    if !(rpe * Decimal::from(2)).fract().is_zero() {
        return Err(LogError::validation(
            "rpe",
            rpe,
            "must be a whole or half step (e.g. 7 or 7.5)",
        ));
    }
    Ok(rpe.normalize())
}
