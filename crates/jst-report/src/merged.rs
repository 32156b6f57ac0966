//! Merged-table CSV output.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

/// Writes the merged table as comma-separated CSV with a header row.
pub fn write_merged_csv(df: &DataFrame, path: &Path) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut out)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), rows = df.height(), "wrote merged table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use polars::df;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn writes_header_and_rows() {
        let data = df!(
            "jst_code" => ["0201011"],
            "year" => [2020i64],
            "fires" => [3.0],
        )
        .unwrap();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.csv");
        write_merged_csv(&data, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut lines = contents.lines();
        assert_eq!(lines.next(), Some("jst_code,year,fires"));
        assert_eq!(lines.next(), Some("0201011,2020,3.0"));
    }
}
