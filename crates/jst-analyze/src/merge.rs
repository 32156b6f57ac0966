//! Multi-key merge of the canonical tables.
//!
//! The joins are explicit cross-product-by-key joins built from hash
//! indexes rather than a table-join primitive: duplicate keys on either
//! side are a real data-quality scenario and every matching pair of rows
//! must be preserved. Null key components join like values (null == null),
//! matching the upstream behavior of the source data.

use std::collections::{HashMap, HashSet};

use jst_model::MergeMeta;
use jst_model::kind::{JST_CODE_COLUMN, YEAR_COLUMN};
use polars::prelude::{DataFrame, IdxCa, IdxSize, NewChunkedArray, PolarsResult};
use tracing::debug;

use crate::frame::{coerce_metrics, column_i64, column_string};

/// Metric columns coerced to numeric after the joins.
pub(crate) const METRIC_COLUMNS: [&str; 4] =
    ["fires", "alcohol_outlets", "population", "area_km2"];

/// A `(jst_code, year)` join key; `None` components join with each other.
type PairKey = (Option<String>, Option<i64>);

/// Joins psp, alcohol, and population on `(jst_code, year)` with inner
/// semantics, then left-joins area — by `(jst_code, year)` when the area
/// table carries any year, by `jst_code` alone (first row per code) when
/// it is static. Returns the merged table and the merge metadata.
///
/// A join producing zero rows is not an error; it is reflected in the
/// metadata and the downstream statistics.
pub fn merge_all(
    psp: &DataFrame,
    alcohol: &DataFrame,
    population: &DataFrame,
    area: Option<&DataFrame>,
) -> PolarsResult<(DataFrame, MergeMeta)> {
    let mut meta = MergeMeta {
        rows_psp_raw: psp.height(),
        rows_alcohol_raw: alcohol.height(),
        rows_population_raw: population.height(),
        ..MergeMeta::default()
    };

    let mut merged = inner_join_pairs(psp, alcohol)?;
    merged = inner_join_pairs(&merged, population)?;

    if let Some(area) = area {
        if has_any_year(area)? {
            merged = left_join_pairs(&merged, area)?;
        } else {
            let static_area = first_row_per_code(area)?;
            merged = left_join_code(&merged, &static_area)?;
        }
    }
    meta.rows_merged = merged.height();

    let merged = coerce_metrics(&merged, &METRIC_COLUMNS)?;

    meta.unique_pairs_psp = unique_non_null_pairs(psp)?;
    meta.unique_pairs_alcohol = unique_non_null_pairs(alcohol)?;
    meta.unique_pairs_population = unique_non_null_pairs(population)?;
    meta.unique_pairs_intersection = unique_pairs(&merged)?;

    debug!(
        rows_merged = meta.rows_merged,
        pairs = meta.unique_pairs_intersection,
        "merge complete"
    );
    Ok((merged, meta))
}

fn pair_keys(df: &DataFrame) -> PolarsResult<Vec<PairKey>> {
    let codes = column_string(df, JST_CODE_COLUMN)?;
    let years = column_i64(df, YEAR_COLUMN)?;
    Ok(codes.into_iter().zip(years).collect())
}

/// Inner join on `(jst_code, year)`, emitting the cross product of
/// matching rows per key. Left row order is preserved; the right table's
/// key columns are dropped from the output.
fn inner_join_pairs(left: &DataFrame, right: &DataFrame) -> PolarsResult<DataFrame> {
    let right_index = build_index(pair_keys(right)?);

    let mut left_rows: Vec<IdxSize> = Vec::new();
    let mut right_rows: Vec<IdxSize> = Vec::new();
    for (left_row, key) in pair_keys(left)?.into_iter().enumerate() {
        if let Some(matches) = right_index.get(&key) {
            for &right_row in matches {
                left_rows.push(left_row as IdxSize);
                right_rows.push(right_row);
            }
        }
    }

    let gathered_left = left.take(&IdxCa::from_vec("idx".into(), left_rows))?;
    let gathered_right = drop_keys(right)?.take(&IdxCa::from_vec("idx".into(), right_rows))?;
    gathered_left.hstack(gathered_right.get_columns())
}

/// Left join on `(jst_code, year)`; unmatched left rows keep nulls for the
/// right table's columns, matched keys emit every matching right row.
fn left_join_pairs(left: &DataFrame, right: &DataFrame) -> PolarsResult<DataFrame> {
    let right_index = build_index(pair_keys(right)?);
    let left_keys = pair_keys(left)?;
    join_left_indexed(left, right, &left_keys, &right_index)
}

/// Left join on `jst_code` alone, used for static (year-less) area data.
fn left_join_code(left: &DataFrame, right: &DataFrame) -> PolarsResult<DataFrame> {
    let right_index = build_index(column_string(right, JST_CODE_COLUMN)?);
    let left_keys = column_string(left, JST_CODE_COLUMN)?;
    join_left_indexed(left, right, &left_keys, &right_index)
}

fn join_left_indexed<K: std::hash::Hash + Eq>(
    left: &DataFrame,
    right: &DataFrame,
    left_keys: &[K],
    right_index: &HashMap<K, Vec<IdxSize>>,
) -> PolarsResult<DataFrame> {
    let mut left_rows: Vec<IdxSize> = Vec::new();
    let mut right_rows: Vec<Option<IdxSize>> = Vec::new();
    for (left_row, key) in left_keys.iter().enumerate() {
        match right_index.get(key) {
            Some(matches) => {
                for &right_row in matches {
                    left_rows.push(left_row as IdxSize);
                    right_rows.push(Some(right_row));
                }
            }
            None => {
                left_rows.push(left_row as IdxSize);
                right_rows.push(None);
            }
        }
    }

    let gathered_left = left.take(&IdxCa::from_vec("idx".into(), left_rows))?;
    let gathered_right =
        drop_keys(right)?.take(&IdxCa::from_iter_options("idx".into(), right_rows.into_iter()))?;
    gathered_left.hstack(gathered_right.get_columns())
}

fn build_index<K: std::hash::Hash + Eq>(keys: Vec<K>) -> HashMap<K, Vec<IdxSize>> {
    let mut index: HashMap<K, Vec<IdxSize>> = HashMap::new();
    for (row, key) in keys.into_iter().enumerate() {
        index.entry(key).or_default().push(row as IdxSize);
    }
    index
}

fn drop_keys(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut out = df.clone();
    for key in [JST_CODE_COLUMN, YEAR_COLUMN] {
        if out.column(key).is_ok() {
            out = out.drop(key)?;
        }
    }
    Ok(out)
}

/// True when the area table's year column carries at least one
/// non-missing value after coercion.
fn has_any_year(df: &DataFrame) -> PolarsResult<bool> {
    Ok(column_i64(df, YEAR_COLUMN)?.iter().any(Option::is_some))
}

/// Reduces a static area table to `{jst_code, area_km2}` with the first
/// occurrence kept per code.
fn first_row_per_code(area: &DataFrame) -> PolarsResult<DataFrame> {
    let trimmed = area.select([JST_CODE_COLUMN, "area_km2"])?;
    let codes = column_string(&trimmed, JST_CODE_COLUMN)?;
    let mut seen: HashSet<Option<String>> = HashSet::new();
    let mut keep: Vec<IdxSize> = Vec::new();
    for (row, code) in codes.into_iter().enumerate() {
        if seen.insert(code) {
            keep.push(row as IdxSize);
        }
    }
    trimmed.take(&IdxCa::from_vec("idx".into(), keep))
}

/// Count of unique `(jst_code, year)` pairs with both components non-null.
fn unique_non_null_pairs(df: &DataFrame) -> PolarsResult<usize> {
    let mut pairs: HashSet<(String, i64)> = HashSet::new();
    for (code, year) in pair_keys(df)? {
        if let (Some(code), Some(year)) = (code, year) {
            pairs.insert((code, year));
        }
    }
    Ok(pairs.len())
}

/// Count of unique `(jst_code, year)` pairs, nulls included.
fn unique_pairs(df: &DataFrame) -> PolarsResult<usize> {
    let mut pairs: HashSet<PairKey> = HashSet::new();
    for key in pair_keys(df)? {
        pairs.insert(key);
    }
    Ok(pairs.len())
}
