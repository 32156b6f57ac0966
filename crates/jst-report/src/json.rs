//! JSON summary report.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jst_model::Summary;
use tracing::info;

/// Renders the summary as pretty-printed JSON.
pub fn render_report(summary: &Summary) -> Result<String> {
    serde_json::to_string_pretty(summary).context("failed to serialize summary")
}

/// Writes the summary report to `path`, creating parent directories as
/// needed.
pub fn write_report(summary: &Summary, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let json = render_report(summary)?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote summary report");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use jst_model::{Correlations, MergeMeta, Notes, PairMetrics};
    use tempfile::TempDir;

    use super::*;

    fn sample_summary() -> Summary {
        Summary {
            meta: MergeMeta::default(),
            stats: BTreeMap::new(),
            correlations: Correlations {
                population_vs_fires: PairMetrics::insufficient(0),
                population_vs_alcohol: PairMetrics::insufficient(0),
                alcohol_vs_fires: PairMetrics::insufficient(0),
                per_capita_outlets_vs_per_capita_fires: PairMetrics::insufficient(0),
            },
            inconsistencies: BTreeMap::new(),
            notes: Notes::standard(7),
        }
    }

    #[test]
    fn rendered_report_is_valid_json() {
        let json = render_report(&sample_summary()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["meta"]["rows_merged"].is_number());
        assert_eq!(value["notes"]["jst_code_length"], 7);
    }

    #[test]
    fn write_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");
        write_report(&sample_summary(), &path).unwrap();
        assert!(path.is_file());
    }
}
