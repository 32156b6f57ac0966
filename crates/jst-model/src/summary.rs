//! The serializable analysis summary.
//!
//! A [`Summary`] is constructed once per run, never mutated afterwards, and
//! written verbatim as the JSON report.

use std::collections::BTreeMap;

use serde::Serialize;

/// Row and key-pair counts recorded around the merge stage.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeMeta {
    pub rows_psp_raw: usize,
    pub rows_alcohol_raw: usize,
    pub rows_population_raw: usize,
    pub rows_merged: usize,
    /// Unique `(jst_code, year)` pairs with non-null code and year, per input.
    pub unique_pairs_psp: usize,
    pub unique_pairs_alcohol: usize,
    pub unique_pairs_population: usize,
    /// Unique `(jst_code, year)` pairs present in the merged table.
    pub unique_pairs_intersection: usize,
}

/// Basic descriptive statistics for one numeric column.
///
/// All optional fields are `None` when the column has zero non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats {
    pub count: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

impl BasicStats {
    pub fn empty() -> Self {
        Self {
            count: 0,
            min: None,
            mean: None,
            max: None,
        }
    }
}

/// Pairwise correlation metrics for two numeric columns.
///
/// `pearson_r` and `slope` are `None` when fewer than 2 paired observations
/// are available; `n` always reports the paired-observation count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairMetrics {
    pub n: usize,
    pub pearson_r: Option<f64>,
    pub slope: Option<f64>,
}

impl PairMetrics {
    pub fn insufficient(n: usize) -> Self {
        Self {
            n,
            pearson_r: None,
            slope: None,
        }
    }
}

/// The four hypothesis pairs reported by every run.
#[derive(Debug, Clone, Serialize)]
pub struct Correlations {
    pub population_vs_fires: PairMetrics,
    pub population_vs_alcohol: PairMetrics,
    pub alcohol_vs_fires: PairMetrics,
    pub per_capita_outlets_vs_per_capita_fires: PairMetrics,
}

/// Configured parameters and fixed assumption notes echoed into the report.
#[derive(Debug, Clone, Serialize)]
pub struct Notes {
    pub jst_code_length: usize,
    pub assumptions: Vec<String>,
}

impl Notes {
    /// Standard assumption strings for a run with the given code length.
    pub fn standard(jst_code_length: usize) -> Self {
        Self {
            jst_code_length,
            assumptions: vec![
                "Codes normalized by removing non-digits and truncating to jst_code_length."
                    .to_string(),
                "Area is attached by jst_code; year-less area treated as static.".to_string(),
                "Auto-detected column names based on Polish/English heuristics.".to_string(),
            ],
        }
    }
}

/// Complete analysis result, serialized as the JSON report.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub meta: MergeMeta,
    /// Basic statistics keyed by dataset name (`psp`, `alcohol`,
    /// `population`, and `area` when supplied).
    pub stats: BTreeMap<String, BasicStats>,
    pub correlations: Correlations,
    /// Named data-quality counts; keys depend on which columns exist.
    pub inconsistencies: BTreeMap<String, usize>,
    pub notes: Notes,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notes_carry_code_length_and_assumptions() {
        let notes = Notes::standard(7);
        assert_eq!(notes.jst_code_length, 7);
        assert_eq!(notes.assumptions.len(), 3);
    }

    #[test]
    fn summary_serializes_with_expected_top_level_keys() {
        let summary = Summary {
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
        };
        let value = serde_json::to_value(&summary).unwrap();
        for key in ["meta", "stats", "correlations", "inconsistencies", "notes"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert!(
            value["correlations"]["population_vs_fires"]["pearson_r"].is_null()
        );
    }
}
