pub mod kind;
pub mod options;
pub mod summary;
pub mod timing;
pub mod values;

pub use kind::DatasetKind;
pub use options::AnalysisOptions;
pub use summary::{BasicStats, Correlations, MergeMeta, Notes, PairMetrics, Summary};
pub use timing::StageTimings;
pub use values::{any_to_f64, any_to_i64, any_to_string, parse_f64, parse_year};
