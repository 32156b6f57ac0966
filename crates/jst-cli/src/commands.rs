//! Command execution: run the pipeline and write the requested outputs.

use anyhow::{Context, Result};
use jst_analyze::{AnalysisInputs, AnalysisOutput, run_analysis};
use jst_model::AnalysisOptions;
use jst_report::{write_merged_csv, write_profile, write_report};
use tracing::info_span;

use crate::cli::Cli;

/// Runs the analysis described by the CLI arguments and writes the JSON
/// report plus any optional outputs.
pub fn run(cli: &Cli) -> Result<AnalysisOutput> {
    let run_span = info_span!("analysis");
    let _guard = run_span.enter();

    let inputs = AnalysisInputs {
        psp: &cli.psp,
        alcohol: &cli.alcohol,
        population: &cli.population,
        area: cli.jst_area.as_deref(),
    };
    let options = AnalysisOptions::with_code_length(cli.jst_code_length);
    let output = run_analysis(&inputs, &options).context("analysis failed")?;

    write_report(&output.summary, &cli.output)?;
    if let Some(path) = &cli.save_merged {
        write_merged_csv(&output.merged, path)?;
    }
    if let Some(path) = &cli.profile_out {
        write_profile(&output.timings, path)?;
    }
    Ok(output)
}
