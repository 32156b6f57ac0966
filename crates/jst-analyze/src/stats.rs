//! Descriptive statistics and pairwise correlation metrics.

use jst_model::{BasicStats, PairMetrics};
use polars::prelude::{Column, DataFrame, PolarsResult};

use crate::frame::column_f64;

/// Basic statistics for a named column, coercing values to numeric.
///
/// All of min/mean/max are `None` when the column has no non-missing
/// values.
pub fn basic_stats(df: &DataFrame, column: &str) -> PolarsResult<BasicStats> {
    let values: Vec<f64> = column_f64(df, column)?.into_iter().flatten().collect();
    if values.is_empty() {
        return Ok(BasicStats::empty());
    }
    let count = values.len();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = values.iter().sum::<f64>() / count as f64;
    Ok(BasicStats {
        count,
        min: Some(min),
        mean: Some(mean),
        max: Some(max),
    })
}

/// Pearson correlation and OLS slope (y regressed on x) for two columns.
///
/// `n` counts rows where both values are non-missing; `pearson_r` and
/// `slope` are `None` when `n < 2` or when either column is constant.
pub fn pair_metrics(df: &DataFrame, x: &str, y: &str) -> PolarsResult<PairMetrics> {
    let xs = column_f64(df, x)?;
    let ys = column_f64(df, y)?;
    Ok(pair_metrics_values(&xs, &ys))
}

fn pair_metrics_values(xs: &[Option<f64>], ys: &[Option<f64>]) -> PairMetrics {
    let paired: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| x.zip(*y))
        .collect();
    let n = paired.len();
    if n < 2 {
        return PairMetrics::insufficient(n);
    }

    let nf = n as f64;
    let mean_x = paired.iter().map(|(x, _)| x).sum::<f64>() / nf;
    let mean_y = paired.iter().map(|(_, y)| y).sum::<f64>() / nf;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &paired {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let pearson_r = if var_x > 0.0 && var_y > 0.0 {
        Some(cov / (var_x.sqrt() * var_y.sqrt()))
    } else {
        None
    };
    let slope = if var_x > 0.0 { Some(cov / var_x) } else { None };
    PairMetrics { n, pearson_r, slope }
}

/// Appends `fires_per_1000` and `outlets_per_1000` to the merged table.
///
/// Only computed when a population column is present. A zero or missing
/// population yields a missing ratio for that row, never an error.
pub fn add_ratio_columns(df: &DataFrame) -> PolarsResult<DataFrame> {
    if df.column("population").is_err() {
        return Ok(df.clone());
    }
    let population = column_f64(df, "population")?;
    let mut out = df.clone();
    for (metric, ratio_name) in [
        ("fires", "fires_per_1000"),
        ("alcohol_outlets", "outlets_per_1000"),
    ] {
        let values = column_f64(&out, metric)?;
        let ratios: Vec<Option<f64>> = values
            .iter()
            .zip(&population)
            .map(|(value, pop)| per_thousand(*value, *pop))
            .collect();
        out.with_column(Column::new(ratio_name.into(), ratios))?;
    }
    Ok(out)
}

fn per_thousand(value: Option<f64>, population: Option<f64>) -> Option<f64> {
    match (value, population) {
        (Some(v), Some(p)) if p != 0.0 => Some(v / p * 1000.0),
        _ => None,
    }
}
