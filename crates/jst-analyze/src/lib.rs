//! Analysis over canonical JST tables: merging on `(jst_code, year)`,
//! descriptive statistics, correlations, and consistency checks.

pub mod analysis;
pub mod consistency;
pub mod error;
pub mod frame;
pub mod merge;
pub mod stats;

pub use analysis::{AnalysisInputs, AnalysisOutput, run_analysis};
pub use consistency::check_consistency;
pub use error::{AnalyzeError, Result};
pub use merge::merge_all;
pub use stats::{add_ratio_columns, basic_stats, pair_metrics};
