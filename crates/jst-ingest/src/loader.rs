//! File-or-directory loading with vertical concatenation.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::reader::{is_spreadsheet, read_table};

/// Loads one combined table from a single file or a directory tree.
///
/// A directory is walked recursively; every file with a supported extension
/// is loaded and the tables are concatenated vertically. Files need not
/// share identical columns; missing values are filled with null. Row order
/// follows the traversal order and is not guaranteed stable across
/// platforms.
pub fn load_many(path: &Path) -> Result<DataFrame> {
    if path.is_dir() {
        let files = collect_eligible_files(path)?;
        if files.is_empty() {
            return Err(IngestError::NoEligibleFiles {
                path: path.to_path_buf(),
            });
        }
        let mut frames = Vec::with_capacity(files.len());
        for file in &files {
            debug!(path = %file.display(), "loading table");
            frames.push(read_table(file)?);
        }
        let combined = polars::functions::concat_df_diagonal(&frames)?;
        info!(
            path = %path.display(),
            files = files.len(),
            rows = combined.height(),
            "loaded directory"
        );
        Ok(combined)
    } else if path.is_file() {
        read_table(path)
    } else {
        Err(IngestError::PathNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// True for extensions the loader will pick up when walking a directory.
pub fn is_eligible(path: &Path) -> bool {
    if is_spreadsheet(path) {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

/// Recursively collects eligible files under `dir`, sorted per directory
/// so repeated runs on the same tree load in the same order.
fn collect_eligible_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let read_error = |source: std::io::Error| IngestError::FileRead {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .map_err(read_error)?;
    entries.sort();

    for entry in entries {
        if entry.is_dir() {
            walk(&entry, files)?;
        } else if entry.is_file() && is_eligible(&entry) {
            files.push(entry);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_path_is_an_error() {
        let err = load_many(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, IngestError::PathNotFound { .. }));
    }

    #[test]
    fn empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a table").unwrap();
        let err = load_many(dir.path()).unwrap_err();
        assert!(matches!(err, IngestError::NoEligibleFiles { .. }));
    }

    #[test]
    fn single_file_loads_directly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.csv");
        std::fs::write(&path, "kod,rok\n1234567,2020\n").unwrap();
        let df = load_many(&path).unwrap();
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn directory_concatenates_with_null_fill() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.csv"), "kod,rok\n1234567,2020\n").unwrap();
        std::fs::write(
            dir.path().join("b.csv"),
            "kod,rok,extra\n7654321,2021,x\n",
        )
        .unwrap();
        let df = load_many(dir.path()).unwrap();
        assert_eq!(df.height(), 2);
        // Column diversity preserved; file without "extra" gets null.
        let extra = df.column("extra").unwrap();
        assert_eq!(extra.null_count(), 1);
    }

    #[test]
    fn walks_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2020");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("a.csv"), "kod,rok\n1234567,2020\n").unwrap();
        std::fs::write(dir.path().join("b.csv"), "kod,rok\n7654321,2021\n").unwrap();
        let df = load_many(dir.path()).unwrap();
        assert_eq!(df.height(), 2);
    }
}
