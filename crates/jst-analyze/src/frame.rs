//! DataFrame access and coercion helpers.
//!
//! Canonical tables arrive string-typed; these helpers turn key and metric
//! columns into typed vectors or typed columns, mapping anything
//! non-parseable to null.

use jst_model::kind::YEAR_COLUMN;
use jst_model::{any_to_f64, any_to_i64, any_to_string};
use polars::prelude::{AnyValue, Column, DataFrame, PolarsResult};

/// Extracts a column as `f64` values, coercing strings and mapping
/// non-parseable values to `None`.
pub fn column_f64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_f64(&value));
    }
    Ok(values)
}

/// Extracts a column as `i64` values, accepting integral floats.
pub fn column_i64(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<i64>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_i64(&value));
    }
    Ok(values)
}

/// Extracts a column as strings, with null and empty both mapping to `None`.
pub fn column_string(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = column.get(idx).unwrap_or(AnyValue::Null);
        let text = any_to_string(&value);
        values.push(if text.is_empty() { None } else { Some(text) });
    }
    Ok(values)
}

/// Replaces the `year` column with a coerced `Int64` column.
pub fn coerce_year(df: &DataFrame) -> PolarsResult<DataFrame> {
    let years = column_i64(df, YEAR_COLUMN)?;
    let mut out = df.clone();
    out.replace(
        YEAR_COLUMN,
        Column::new(YEAR_COLUMN.into(), years).take_materialized_series(),
    )?;
    Ok(out)
}

/// Replaces each listed column (where present) with a coerced `Float64`
/// column; non-parseable values become null.
pub fn coerce_metrics(df: &DataFrame, columns: &[&str]) -> PolarsResult<DataFrame> {
    let mut out = df.clone();
    for name in columns {
        if out.column(name).is_err() {
            continue;
        }
        let values = column_f64(&out, name)?;
        out.replace(
            name,
            Column::new((*name).into(), values).take_materialized_series(),
        )?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn coerce_year_handles_garbage() {
        let raw = df!(
            "year" => [Some("2020"), Some("n/a"), None],
        )
        .unwrap();
        let out = coerce_year(&raw).unwrap();
        let years = column_i64(&out, "year").unwrap();
        assert_eq!(years, vec![Some(2020), None, None]);
    }

    #[test]
    fn coerce_metrics_skips_absent_columns() {
        let raw = df!(
            "fires" => ["10", "x"],
        )
        .unwrap();
        let out = coerce_metrics(&raw, &["fires", "area_km2"]).unwrap();
        assert_eq!(column_f64(&out, "fires").unwrap(), vec![Some(10.0), None]);
        assert!(out.column("area_km2").is_err());
    }
}
