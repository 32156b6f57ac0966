//! Ingestion for JST risk analytics: loading heterogeneous tabular files,
//! detecting canonical columns, and normalizing region codes.

pub mod codes;
pub mod detect;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod reader;

pub use codes::{normalize_code, unify_jst_codes};
pub use detect::{CanonicalField, find_column};
pub use error::{IngestError, Result};
pub use loader::{is_eligible, load_many};
pub use normalize::normalize_columns;
pub use reader::{read_delimited, read_spreadsheet, read_table};
