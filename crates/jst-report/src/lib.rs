//! Output generation for analysis runs.
//!
//! Three writers, each taking an already-computed artifact:
//!
//! - **JSON summary**: the full analysis report
//! - **Merged CSV**: the reconciled table, written on request
//! - **Profile**: per-stage wall-clock timings as plain text

mod json;
mod merged;
mod profile;

pub use json::{render_report, write_report};
pub use merged::write_merged_csv;
pub use profile::{render_profile, write_profile};
