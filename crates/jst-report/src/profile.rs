//! Plain-text timing profile.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use jst_model::StageTimings;
use tracing::info;

/// Renders stage timings as aligned text, one stage per line, with a
/// trailing total.
pub fn render_profile(timings: &StageTimings) -> String {
    let width = timings
        .stages()
        .iter()
        .map(|(name, _)| name.len())
        .max()
        .unwrap_or(0)
        .max("total".len());
    let mut out = String::new();
    for (name, duration) in timings.stages() {
        let _ = writeln!(out, "{name:<width$}  {:>10.3} ms", duration.as_secs_f64() * 1e3);
    }
    let _ = writeln!(
        out,
        "{:<width$}  {:>10.3} ms",
        "total",
        timings.total().as_secs_f64() * 1e3
    );
    out
}

/// Writes the timing profile to `path`.
pub fn write_profile(timings: &StageTimings, path: &Path) -> Result<()> {
    fs::write(path, render_profile(timings))
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "wrote timing profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn renders_stages_in_order_with_total() {
        let mut timings = StageTimings::new();
        timings.record("load", Duration::from_millis(120));
        timings.record("merge", Duration::from_millis(30));

        let text = render_profile(&timings);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("load"));
        assert!(lines[1].starts_with("merge"));
        assert!(lines[2].starts_with("total"));
        assert!(lines[2].contains("150.000 ms"));
    }

    #[test]
    fn empty_timings_still_render_a_total() {
        let text = render_profile(&StageTimings::new());
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("total"));
    }
}
