//! Single-file table reading.
//!
//! Delimited files are parsed with the Polars CSV reader; every column is
//! read as a string so that numeric coercion happens in one explicit place
//! later in the pipeline. Spreadsheets are read through calamine with the
//! first row of the first sheet taken as the header.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::{Column, CsvParseOptions, CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Candidate separators for delimited files, tried in order.
const SEPARATORS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Reads one tabular file, dispatching on its extension.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    if is_spreadsheet(path) {
        read_spreadsheet(path)
    } else {
        read_delimited(path)
    }
}

/// True for extensions parsed as spreadsheets (`.xlsx`, `.xls`).
pub fn is_spreadsheet(path: &Path) -> bool {
    matches!(
        extension_lowercase(path).as_deref(),
        Some("xlsx") | Some("xls")
    )
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Reads a delimited-text file, trying each candidate separator in order
/// and keeping the first one that parses without error. Falls back to a
/// comma-default read if all candidates fail.
pub fn read_delimited(path: &Path) -> Result<DataFrame> {
    for separator in SEPARATORS {
        match read_csv_with_separator(path, separator) {
            Ok(df) => {
                debug!(
                    path = %path.display(),
                    separator = %(separator as char),
                    rows = df.height(),
                    "parsed delimited file"
                );
                return Ok(df);
            }
            Err(_) => continue,
        }
    }
    read_csv_with_separator(path, b',')
}

fn read_csv_with_separator(path: &Path, separator: u8) -> Result<DataFrame> {
    let parse_options = CsvParseOptions::default().with_separator(separator);
    // infer_schema_length of 0 keeps every column as a string.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(parse_options)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads the first sheet of a spreadsheet into an all-string DataFrame.
pub fn read_spreadsheet(path: &Path) -> Result<DataFrame> {
    let spreadsheet_error = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook =
        open_workbook_auto(path).map_err(|e| spreadsheet_error(e.to_string()))?;
    let sheet_names = workbook.sheet_names();
    let first_sheet = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| spreadsheet_error("workbook contains no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| spreadsheet_error(e.to_string()))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = header_names(header_row);

    let mut columns: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    for row in rows {
        for (idx, values) in columns.iter_mut().enumerate() {
            values.push(row.get(idx).and_then(cell_to_string));
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name.into(), values))
        .collect();
    DataFrame::new(columns).map_err(|e| spreadsheet_error(e.to_string()))
}

/// Header names from the first sheet row; blank or repeated headers get a
/// positional suffix so column names stay unique.
fn header_names(header_row: &[Data]) -> Vec<String> {
    let mut names = Vec::with_capacity(header_row.len());
    for (idx, cell) in header_row.iter().enumerate() {
        let raw = cell_to_string(cell)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();
        let mut name = if raw.is_empty() {
            format!("column_{idx}")
        } else {
            raw
        };
        if names.contains(&name) {
            name = format!("{name}_{idx}");
        }
        names.push(name);
    }
    names
}

fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Data::Float(n) => {
            // Integers without a trailing ".0" so codes survive round-trips.
            if n.fract() == 0.0 && n.abs() < 1e15 {
                Some(format!("{}", *n as i64))
            } else {
                Some(format!("{n}"))
            }
        }
        Data::Int(n) => Some(n.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(format!("{}", dt.as_f64())),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(e) => Some(format!("#{e:?}")),
    }
}
