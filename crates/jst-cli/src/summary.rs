//! Stdout summary tables for a completed run.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use jst_model::{PairMetrics, Summary};

/// Prints merge counts, correlations, and data-quality findings.
pub fn print_summary(summary: &Summary) {
    let mut counts = Table::new();
    apply_table_style(&mut counts);
    counts.set_header(vec![header_cell("Counts"), header_cell("Value")]);
    align_column(&mut counts, 1, CellAlignment::Right);
    let meta = &summary.meta;
    for (label, value) in [
        ("psp rows (raw)", meta.rows_psp_raw),
        ("alcohol rows (raw)", meta.rows_alcohol_raw),
        ("population rows (raw)", meta.rows_population_raw),
        ("merged rows", meta.rows_merged),
        ("unique (code, year) in intersection", meta.unique_pairs_intersection),
    ] {
        counts.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    println!("{counts}");

    let mut correlations = Table::new();
    apply_table_style(&mut correlations);
    correlations.set_header(vec![
        header_cell("Correlation"),
        header_cell("n"),
        header_cell("Pearson r"),
        header_cell("Slope"),
    ]);
    for column in 1..4 {
        align_column(&mut correlations, column, CellAlignment::Right);
    }
    let pairs = &summary.correlations;
    for (label, metrics) in [
        ("population vs fires", &pairs.population_vs_fires),
        ("population vs alcohol", &pairs.population_vs_alcohol),
        ("alcohol vs fires", &pairs.alcohol_vs_fires),
        (
            "outlets/1000 vs fires/1000",
            &pairs.per_capita_outlets_vs_per_capita_fires,
        ),
    ] {
        correlations.add_row(correlation_row(label, metrics));
    }
    println!("{correlations}");

    // Zero counts stay in the JSON report; the terminal shows only findings.
    let nonzero: Vec<(&String, &usize)> = summary
        .inconsistencies
        .iter()
        .filter(|(_, count)| **count > 0)
        .collect();
    if !nonzero.is_empty() {
        let mut findings = Table::new();
        apply_table_style(&mut findings);
        findings.set_header(vec![header_cell("Finding"), header_cell("Count")]);
        align_column(&mut findings, 1, CellAlignment::Right);
        for (name, count) in nonzero {
            findings.add_row(vec![Cell::new(name), Cell::new(count)]);
        }
        println!("{findings}");
    }
}

fn correlation_row(label: &str, metrics: &PairMetrics) -> Vec<Cell> {
    vec![
        Cell::new(label),
        Cell::new(metrics.n),
        Cell::new(format_metric(metrics.pearson_r)),
        Cell::new(format_metric(metrics.slope)),
    ]
}

fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.4}"),
        None => "-".to_string(),
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_formatting() {
        assert_eq!(format_metric(Some(0.12345)), "0.1235");
        assert_eq!(format_metric(None), "-");
    }
}
