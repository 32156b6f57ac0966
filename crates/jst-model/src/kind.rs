//! Dataset kinds handled by the pipeline.

use std::fmt;

/// The four source dataset kinds reconciled under the `(jst_code, year)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    /// Fire/intervention events reported by the state fire service.
    Psp,
    /// Alcohol-outlet concession counts.
    Alcohol,
    /// Population counts.
    Population,
    /// Region surface area; the only kind where `year` may be absent.
    Area,
}

impl DatasetKind {
    /// Canonical name of the metric column for this kind.
    pub fn metric_column(self) -> &'static str {
        match self {
            Self::Psp => "fires",
            Self::Alcohol => "alcohol_outlets",
            Self::Population => "population",
            Self::Area => "area_km2",
        }
    }

    /// Stable name used in reports and error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Psp => "psp",
            Self::Alcohol => "alcohol",
            Self::Population => "population",
            Self::Area => "area",
        }
    }

    /// Whether a `year` column is required for this kind.
    ///
    /// Area tables may be static (one row per region, no year).
    pub fn requires_year(self) -> bool {
        !matches!(self, Self::Area)
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical region-code column name shared by every canonical table.
pub const JST_CODE_COLUMN: &str = "jst_code";

/// Canonical year column name.
pub const YEAR_COLUMN: &str = "year";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_columns_are_distinct() {
        let kinds = [
            DatasetKind::Psp,
            DatasetKind::Alcohol,
            DatasetKind::Population,
            DatasetKind::Area,
        ];
        for a in kinds {
            for b in kinds {
                if a != b {
                    assert_ne!(a.metric_column(), b.metric_column());
                }
            }
        }
    }

    #[test]
    fn only_area_may_skip_year() {
        assert!(DatasetKind::Psp.requires_year());
        assert!(DatasetKind::Alcohol.requires_year());
        assert!(DatasetKind::Population.requires_year());
        assert!(!DatasetKind::Area.requires_year());
    }
}
