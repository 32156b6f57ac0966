//! Analysis configuration passed explicitly into each pipeline stage.

/// Default normalized length of a JST (TERYT) region code.
pub const DEFAULT_JST_CODE_LENGTH: usize = 7;

/// Run-wide configuration.
///
/// There is no process-global state; every interface that needs the code
/// length receives these options (or the length itself) as an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Length that region codes are truncated to after stripping non-digits.
    pub jst_code_length: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            jst_code_length: DEFAULT_JST_CODE_LENGTH,
        }
    }
}

impl AnalysisOptions {
    pub fn with_code_length(length: usize) -> Self {
        Self {
            jst_code_length: length,
        }
    }
}
