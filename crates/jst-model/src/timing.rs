//! Per-stage wall-clock timings for the optional profiling report.

use std::time::Duration;

/// Ordered record of `(stage name, duration)` pairs for one run.
///
/// Purely diagnostic; never part of the functional contract.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    stages: Vec<(String, Duration)>,
    total: Duration,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed stage, in execution order.
    pub fn record(&mut self, stage: impl Into<String>, duration: Duration) {
        self.total += duration;
        self.stages.push((stage.into(), duration));
    }

    pub fn stages(&self) -> &[(String, Duration)] {
        &self.stages
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
