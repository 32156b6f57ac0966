//! End-to-end pipeline tests over real files on disk.

use std::fs;
use std::path::Path;

use jst_analyze::{AnalysisInputs, run_analysis};
use jst_model::AnalysisOptions;
use tempfile::TempDir;

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn full_run_over_csv_inputs() {
    let dir = TempDir::new().unwrap();
    let psp = write(
        dir.path(),
        "psp.csv",
        "Kod GUS,Rok,Liczba pozarow\n02-01-01-1,2020,12\n02-01-02-3,2020,7\n",
    );
    let alcohol = write(
        dir.path(),
        "alcohol.csv",
        "kod,rok,liczba zezwolen\n0201011,2020,40\n0201023,2020,25\n",
    );
    let population = write(
        dir.path(),
        "population.csv",
        "kod,rok,ludnosc\n0201011,2020,10000\n0201023,2020,5000\n",
    );

    let inputs = AnalysisInputs {
        psp: &psp,
        alcohol: &alcohol,
        population: &population,
        area: None,
    };
    let output = run_analysis(&inputs, &AnalysisOptions::default()).unwrap();

    let meta = &output.summary.meta;
    assert_eq!(meta.rows_psp_raw, 2);
    assert_eq!(meta.rows_alcohol_raw, 2);
    assert_eq!(meta.rows_population_raw, 2);
    assert_eq!(meta.rows_merged, 2);
    assert_eq!(meta.unique_pairs_intersection, 2);

    let fires = output.summary.stats.get("psp").unwrap();
    assert_eq!(fires.count, 2);
    assert_eq!(fires.min, Some(7.0));
    assert_eq!(fires.max, Some(12.0));
    assert!(output.summary.stats.get("area").is_none());

    // Two rows where bigger population goes with more fires and outlets.
    let pop_fires = &output.summary.correlations.population_vs_fires;
    assert_eq!(pop_fires.n, 2);
    assert_eq!(pop_fires.pearson_r, Some(1.0));

    let per_capita = &output
        .summary
        .correlations
        .per_capita_outlets_vs_per_capita_fires;
    assert_eq!(per_capita.n, 2);

    assert!(output.summary.inconsistencies.values().all(|count| *count == 0));
    assert_eq!(output.summary.notes.jst_code_length, 7);
    assert!(!output.timings.is_empty());

    let columns: Vec<&str> = output
        .merged
        .get_column_names()
        .into_iter()
        .map(|name| name.as_str())
        .collect();
    assert!(columns.contains(&"fires_per_1000"));
    assert!(columns.contains(&"outlets_per_1000"));
    let fires_per_1000 = jst_analyze::frame::column_f64(&output.merged, "fires_per_1000").unwrap();
    let expected = [1.2, 1.4];
    for (value, want) in fires_per_1000.iter().zip(expected) {
        assert!((value.unwrap() - want).abs() < 1e-9);
    }
}

#[test]
fn static_area_is_attached_by_code() {
    let dir = TempDir::new().unwrap();
    let psp = write(
        dir.path(),
        "psp.csv",
        "kod,rok,pozary\n0201011,2020,3\n0201011,2021,4\n",
    );
    let alcohol = write(
        dir.path(),
        "alcohol.csv",
        "kod,rok,koncesje\n0201011,2020,10\n0201011,2021,11\n",
    );
    let population = write(
        dir.path(),
        "population.csv",
        "kod,rok,ludnosc\n0201011,2020,1000\n0201011,2021,1000\n",
    );
    let area = write(
        dir.path(),
        "area.csv",
        "kod,powierzchnia km2\n0201011,53.5\n",
    );

    let inputs = AnalysisInputs {
        psp: &psp,
        alcohol: &alcohol,
        population: &population,
        area: Some(&area),
    };
    let output = run_analysis(&inputs, &AnalysisOptions::default()).unwrap();

    assert_eq!(output.summary.meta.rows_merged, 2);
    // Area stats describe the input table, not the merged rows.
    let area_stats = output.summary.stats.get("area").unwrap();
    assert_eq!(area_stats.count, 1);
    assert_eq!(area_stats.min, Some(53.5));
    assert_eq!(area_stats.max, Some(53.5));
    let areas = jst_analyze::frame::column_f64(&output.merged, "area_km2").unwrap();
    assert_eq!(areas, vec![Some(53.5), Some(53.5)]);
}

#[test]
fn directory_inputs_are_concatenated() {
    let dir = TempDir::new().unwrap();
    let psp_dir = dir.path().join("psp");
    fs::create_dir(&psp_dir).unwrap();
    write(&psp_dir, "a.csv", "kod,rok,pozary\n0201011,2020,3\n");
    write(&psp_dir, "b.csv", "kod,rok,pozary\n0201023,2020,5\n");
    let alcohol = write(
        dir.path(),
        "alcohol.csv",
        "kod,rok,koncesje\n0201011,2020,10\n0201023,2020,20\n",
    );
    let population = write(
        dir.path(),
        "population.csv",
        "kod,rok,ludnosc\n0201011,2020,1000\n0201023,2020,2000\n",
    );

    let inputs = AnalysisInputs {
        psp: &psp_dir,
        alcohol: &alcohol,
        population: &population,
        area: None,
    };
    let output = run_analysis(&inputs, &AnalysisOptions::default()).unwrap();
    assert_eq!(output.summary.meta.rows_psp_raw, 2);
    assert_eq!(output.summary.meta.rows_merged, 2);
}

#[test]
fn unreadable_input_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.csv");
    let alcohol = write(dir.path(), "alcohol.csv", "kod,rok,koncesje\n0201011,2020,1\n");
    let population = write(
        dir.path(),
        "population.csv",
        "kod,rok,ludnosc\n0201011,2020,1\n",
    );

    let inputs = AnalysisInputs {
        psp: &missing,
        alcohol: &alcohol,
        population: &population,
        area: None,
    };
    assert!(run_analysis(&inputs, &AnalysisOptions::default()).is_err());
}
