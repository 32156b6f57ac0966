//! Data-quality checks over the merged table.
//!
//! Every finding is a count keyed by a stable name; counts are emitted
//! even when zero so reports stay comparable across runs. Findings never
//! abort the pipeline.

use std::collections::BTreeMap;
use std::collections::HashSet;

use jst_model::kind::{JST_CODE_COLUMN, YEAR_COLUMN};
use polars::prelude::{DataFrame, PolarsResult};

use crate::frame::{column_f64, column_i64, column_string};
use crate::merge::METRIC_COLUMNS;

const NULL_CHECKED_COLUMNS: [&str; 5] =
    [JST_CODE_COLUMN, YEAR_COLUMN, "fires", "alcohol_outlets", "population"];

/// Scans the merged table and returns named inconsistency counts.
///
/// Emitted keys, each present whenever its column(s) exist:
/// * `null_<column>` for key columns and the three primary metrics
/// * `negative_<column>` for each metric column
/// * `duplicate_jst_year_rows`: rows beyond the first per `(jst_code, year)`
/// * `rows_with_missing_core_metric`: rows missing fires, outlets, or
///   population
pub fn check_consistency(df: &DataFrame) -> PolarsResult<BTreeMap<String, usize>> {
    let mut findings = BTreeMap::new();

    for name in NULL_CHECKED_COLUMNS {
        if df.column(name).is_err() {
            continue;
        }
        let nulls = null_count(df, name)?;
        findings.insert(format!("null_{name}"), nulls);
    }

    for name in METRIC_COLUMNS {
        if df.column(name).is_err() {
            continue;
        }
        // Missing values are not negative.
        let negatives = column_f64(df, name)?
            .into_iter()
            .flatten()
            .filter(|v| *v < 0.0)
            .count();
        findings.insert(format!("negative_{name}"), negatives);
    }

    if df.column(JST_CODE_COLUMN).is_ok() && df.column(YEAR_COLUMN).is_ok() {
        findings.insert(
            "duplicate_jst_year_rows".to_string(),
            duplicate_key_rows(df)?,
        );
    }

    if let Some(missing) = rows_with_missing_core_metric(df)? {
        findings.insert("rows_with_missing_core_metric".to_string(), missing);
    }

    Ok(findings)
}

fn null_count(df: &DataFrame, name: &str) -> PolarsResult<usize> {
    if name == YEAR_COLUMN {
        Ok(column_i64(df, name)?.iter().filter(|v| v.is_none()).count())
    } else if name == JST_CODE_COLUMN {
        Ok(column_string(df, name)?
            .iter()
            .filter(|v| v.is_none())
            .count())
    } else {
        Ok(column_f64(df, name)?.iter().filter(|v| v.is_none()).count())
    }
}

/// Number of rows beyond the first occurrence of each `(jst_code, year)`.
fn duplicate_key_rows(df: &DataFrame) -> PolarsResult<usize> {
    let codes = column_string(df, JST_CODE_COLUMN)?;
    let years = column_i64(df, YEAR_COLUMN)?;
    let mut seen = HashSet::new();
    for pair in codes.into_iter().zip(years) {
        seen.insert(pair);
    }
    Ok(df.height() - seen.len())
}

/// Rows where fires, alcohol outlets, or population is missing; `None`
/// when no core metric column exists at all.
fn rows_with_missing_core_metric(df: &DataFrame) -> PolarsResult<Option<usize>> {
    let core = ["fires", "alcohol_outlets", "population"];
    let mut columns = Vec::new();
    for name in core {
        if df.column(name).is_ok() {
            columns.push(column_f64(df, name)?);
        }
    }
    if columns.is_empty() {
        return Ok(None);
    }
    let mut count = 0;
    for row in 0..df.height() {
        if columns.iter().any(|values| values[row].is_none()) {
            count += 1;
        }
    }
    Ok(Some(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn clean_table_reports_all_zero_counts() {
        let data = df!(
            "jst_code" => ["0201011", "0201012"],
            "year" => [2020i64, 2020],
            "fires" => [3.0, 5.0],
            "alcohol_outlets" => [10.0, 20.0],
            "population" => [1000.0, 2000.0],
        )
        .unwrap();
        let findings = check_consistency(&data).unwrap();
        assert_eq!(findings.get("null_jst_code"), Some(&0));
        assert_eq!(findings.get("null_fires"), Some(&0));
        assert_eq!(findings.get("negative_population"), Some(&0));
        assert_eq!(findings.get("duplicate_jst_year_rows"), Some(&0));
        assert_eq!(findings.get("rows_with_missing_core_metric"), Some(&0));
        // area_km2 is absent, so no keys for it.
        assert_eq!(findings.get("negative_area_km2"), None);
        assert!(findings.values().all(|count| *count == 0));
    }

    #[test]
    fn counts_nulls_negatives_and_duplicates() {
        let data = df!(
            "jst_code" => ["0201011", "0201011", "0201012"],
            "year" => [2020i64, 2020, 2021],
            "fires" => [Some(-1.0), Some(2.0), None],
            "alcohol_outlets" => [Some(10.0), Some(20.0), Some(30.0)],
            "population" => [Some(1000.0), Some(1000.0), Some(2000.0)],
        )
        .unwrap();
        let findings = check_consistency(&data).unwrap();
        assert_eq!(findings.get("null_fires"), Some(&1));
        assert_eq!(findings.get("negative_fires"), Some(&1));
        assert_eq!(findings.get("duplicate_jst_year_rows"), Some(&1));
        assert_eq!(findings.get("rows_with_missing_core_metric"), Some(&1));
        assert_eq!(findings.get("null_alcohol_outlets"), Some(&0));
    }

    #[test]
    fn null_key_columns_are_counted() {
        let data = df!(
            "jst_code" => [Some("0201011"), None],
            "year" => [Some(2020i64), None],
            "fires" => [1.0, 2.0],
            "alcohol_outlets" => [1.0, 2.0],
            "population" => [10.0, 10.0],
        )
        .unwrap();
        let findings = check_consistency(&data).unwrap();
        assert_eq!(findings.get("null_jst_code"), Some(&1));
        assert_eq!(findings.get("null_year"), Some(&1));
    }

    #[test]
    fn missing_core_metric_counts_each_row_once() {
        let data = df!(
            "jst_code" => ["a", "b"],
            "year" => [2020i64, 2020],
            "fires" => [None::<f64>, None],
            "alcohol_outlets" => [None::<f64>, Some(1.0)],
            "population" => [Some(10.0), Some(10.0)],
        )
        .unwrap();
        let findings = check_consistency(&data).unwrap();
        assert_eq!(findings.get("rows_with_missing_core_metric"), Some(&2));
    }
}
