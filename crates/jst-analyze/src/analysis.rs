//! End-to-end pipeline: load, normalize, merge, analyze.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use jst_ingest::{load_many, normalize_columns, unify_jst_codes};
use jst_model::{
    AnalysisOptions, Correlations, DatasetKind, Notes, StageTimings, Summary,
};
use polars::prelude::DataFrame;
use tracing::{debug, info};

use crate::consistency::check_consistency;
use crate::error::Result;
use crate::frame::coerce_year;
use crate::merge::merge_all;
use crate::stats::{add_ratio_columns, basic_stats, pair_metrics};

/// Input locations for one run. Each path may be a single file or a
/// directory of files of the same dataset.
#[derive(Debug, Clone)]
pub struct AnalysisInputs<'a> {
    pub psp: &'a Path,
    pub alcohol: &'a Path,
    pub population: &'a Path,
    pub area: Option<&'a Path>,
}

/// Everything a run produces: the report summary, the merged table, and
/// per-stage timings.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub summary: Summary,
    pub merged: DataFrame,
    pub timings: StageTimings,
}

/// Runs the full pipeline over the given inputs.
///
/// Fails only on unreadable inputs, undetectable required columns, or
/// table-engine errors; data-quality issues become summary counts.
pub fn run_analysis(inputs: &AnalysisInputs, options: &AnalysisOptions) -> Result<AnalysisOutput> {
    let mut timings = StageTimings::new();

    let start = Instant::now();
    let psp = prepare_dataset(inputs.psp, DatasetKind::Psp, options)?;
    let alcohol = prepare_dataset(inputs.alcohol, DatasetKind::Alcohol, options)?;
    let population = prepare_dataset(inputs.population, DatasetKind::Population, options)?;
    let area = inputs
        .area
        .map(|path| prepare_dataset(path, DatasetKind::Area, options))
        .transpose()?;
    timings.record("load", start.elapsed());

    let start = Instant::now();
    let (merged, meta) = merge_all(&psp, &alcohol, &population, area.as_ref())?;
    timings.record("merge", start.elapsed());
    info!(
        rows_merged = meta.rows_merged,
        unique_pairs = meta.unique_pairs_intersection,
        "merged input datasets"
    );

    let start = Instant::now();
    let merged = add_ratio_columns(&merged)?;
    timings.record("ratios", start.elapsed());

    let start = Instant::now();
    // Per-kind statistics describe the canonical inputs, not the merge.
    let mut stats = BTreeMap::new();
    for (kind, table) in [
        (DatasetKind::Psp, &psp),
        (DatasetKind::Alcohol, &alcohol),
        (DatasetKind::Population, &population),
    ] {
        stats.insert(
            kind.name().to_string(),
            basic_stats(table, kind.metric_column())?,
        );
    }
    if let Some(area) = &area {
        stats.insert(
            DatasetKind::Area.name().to_string(),
            basic_stats(area, DatasetKind::Area.metric_column())?,
        );
    }
    let correlations = Correlations {
        population_vs_fires: pair_metrics(&merged, "population", "fires")?,
        population_vs_alcohol: pair_metrics(&merged, "population", "alcohol_outlets")?,
        alcohol_vs_fires: pair_metrics(&merged, "alcohol_outlets", "fires")?,
        per_capita_outlets_vs_per_capita_fires: pair_metrics(
            &merged,
            "outlets_per_1000",
            "fires_per_1000",
        )?,
    };
    timings.record("stats", start.elapsed());

    let start = Instant::now();
    let inconsistencies = check_consistency(&merged)?;
    timings.record("consistency", start.elapsed());
    let nonzero_findings = inconsistencies.values().filter(|count| **count > 0).count();
    if nonzero_findings > 0 {
        info!(findings = nonzero_findings, "data-quality findings recorded");
    }

    let summary = Summary {
        meta,
        stats,
        correlations,
        inconsistencies,
        notes: Notes::standard(options.jst_code_length),
    };

    Ok(AnalysisOutput {
        summary,
        merged,
        timings,
    })
}

/// Loads one dataset and brings it to canonical shape: detected columns
/// renamed, year coerced to integer, codes unified.
fn prepare_dataset(
    path: &Path,
    kind: DatasetKind,
    options: &AnalysisOptions,
) -> Result<DataFrame> {
    let raw = load_many(path)?;
    debug!(dataset = %kind, rows = raw.height(), path = %path.display(), "loaded dataset");
    let canonical = normalize_columns(&raw, kind)?;
    let canonical = coerce_year(&canonical)?;
    let canonical = unify_jst_codes(&canonical, options.jst_code_length)?;
    Ok(canonical)
}
