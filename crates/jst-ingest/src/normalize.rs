//! Canonical column normalization.
//!
//! Maps a raw table onto the canonical `{jst_code, year, <metric>}` shape
//! for its dataset kind. Detection failure for a required field is a hard
//! error; only the area kind may leave `year` unresolved, in which case
//! the canonical table carries an all-null year column.

use jst_model::DatasetKind;
use jst_model::kind::{JST_CODE_COLUMN, YEAR_COLUMN};
use polars::prelude::{Column, DataFrame, DataType};
use tracing::debug;

use crate::detect::{CanonicalField, find_column};
use crate::error::{IngestError, Result};

/// Standardizes a raw table to the canonical columns for `kind`.
///
/// The output has exactly three columns: `jst_code`, `year`, and the
/// kind's metric column, in that order, all still string-typed.
pub fn normalize_columns(df: &DataFrame, kind: DatasetKind) -> Result<DataFrame> {
    let code_source = require_column(df, CanonicalField::Code, JST_CODE_COLUMN, kind)?;
    let year_source = match find_column(df, CanonicalField::Year) {
        Some(column) => Some(column),
        None if kind.requires_year() => {
            return Err(IngestError::ColumnDetection {
                field: YEAR_COLUMN.to_string(),
                kind,
            });
        }
        None => None,
    };
    let metric_source = require_column(df, metric_field(kind), kind.metric_column(), kind)?;

    debug!(
        kind = %kind,
        code = %code_source,
        year = year_source.as_deref().unwrap_or("<static>"),
        metric = %metric_source,
        "detected canonical columns"
    );

    let year_column = match &year_source {
        Some(source) => renamed(df, source, YEAR_COLUMN)?,
        None => Column::full_null(YEAR_COLUMN.into(), df.height(), &DataType::String),
    };

    let columns = vec![
        renamed(df, &code_source, JST_CODE_COLUMN)?,
        year_column,
        renamed(df, &metric_source, kind.metric_column())?,
    ];
    Ok(DataFrame::new(columns)?)
}

fn require_column(
    df: &DataFrame,
    field: CanonicalField,
    canonical_name: &str,
    kind: DatasetKind,
) -> Result<String> {
    find_column(df, field).ok_or_else(|| IngestError::ColumnDetection {
        field: canonical_name.to_string(),
        kind,
    })
}

fn metric_field(kind: DatasetKind) -> CanonicalField {
    match kind {
        DatasetKind::Psp => CanonicalField::Fires,
        DatasetKind::Alcohol => CanonicalField::Alcohol,
        DatasetKind::Population => CanonicalField::Population,
        DatasetKind::Area => CanonicalField::Area,
    }
}

fn renamed(df: &DataFrame, source: &str, target: &str) -> Result<Column> {
    let mut column = df.column(source)?.clone();
    column.rename(target.into());
    Ok(column)
}
