//! Polars `AnyValue` helpers shared across the pipeline.
//!
//! Raw tables are loaded with all-string columns; these helpers implement
//! the "coerce or go missing" discipline: any value that fails numeric
//! coercion becomes `None` rather than raising.

use polars::prelude::AnyValue;

/// Converts a Polars `AnyValue` to its string representation.
/// Returns an empty string for null.
pub fn any_to_string(value: &AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => v.to_string(),
        AnyValue::Float64(v) => v.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts an `AnyValue` to f64, returning `None` for null or
/// non-parseable values.
pub fn any_to_f64(value: &AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(f64::from(*v)),
        AnyValue::Int64(v) => Some(*v as f64),
        AnyValue::UInt32(v) => Some(f64::from(*v)),
        AnyValue::UInt64(v) => Some(*v as f64),
        AnyValue::Float32(v) => Some(f64::from(*v)),
        AnyValue::Float64(v) => Some(*v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(s),
        _ => None,
    }
}

/// Converts an `AnyValue` to i64, accepting integral floats such as
/// `"2020.0"`.
pub fn any_to_i64(value: &AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int32(v) => Some(i64::from(*v)),
        AnyValue::Int64(v) => Some(*v),
        AnyValue::UInt32(v) => Some(i64::from(*v)),
        AnyValue::UInt64(v) => i64::try_from(*v).ok(),
        _ => any_to_f64(value).and_then(float_to_i64),
    }
}

/// Parses a string as f64, returning `None` for empty or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a year value, tolerating sources that store years as floats.
pub fn parse_year(value: &str) -> Option<i64> {
    parse_f64(value).and_then(float_to_i64)
}

fn float_to_i64(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}
