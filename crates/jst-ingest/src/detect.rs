//! Heuristic column detection.
//!
//! Source files name their columns in Polish or English, with assorted
//! casing and whitespace. Each canonical field has a priority-ordered list
//! of regex patterns; the first pattern that matches any column (columns
//! scanned left to right) resolves the field.

use std::sync::LazyLock;

use polars::prelude::DataFrame;
use regex::Regex;

/// Canonical fields the detector can resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Code,
    Year,
    Fires,
    Alcohol,
    Population,
    Area,
}

impl CanonicalField {
    /// Candidate patterns in priority order, matched case-insensitively
    /// against lowercased, whitespace-stripped header names.
    fn patterns(self) -> &'static [&'static str] {
        match self {
            Self::Code => &["^kod", "jst", "teryt", "gmina", "powiat", "woj"],
            Self::Year => &["^rok", "year"],
            Self::Fires => &["^po[żz]ar", "events?", "interwenc", "zdarze"],
            Self::Alcohol => &["alkohol", "konces", "zezwol", "outlet", "sprzeda"],
            Self::Population => &["^popul", "ludno", "mieszk"],
            Self::Area => &["powierz", "area", "km2", "km²"],
        }
    }

    fn compiled(self) -> &'static [Regex] {
        static COMPILED: LazyLock<Vec<Vec<Regex>>> = LazyLock::new(|| {
            ALL_FIELDS
                .iter()
                .map(|field| {
                    field
                        .patterns()
                        .iter()
                        .map(|p| {
                            Regex::new(&format!("(?i){p}")).expect("candidate pattern compiles")
                        })
                        .collect()
                })
                .collect()
        });
        &COMPILED[self as usize]
    }
}

const ALL_FIELDS: [CanonicalField; 6] = [
    CanonicalField::Code,
    CanonicalField::Year,
    CanonicalField::Fires,
    CanonicalField::Alcohol,
    CanonicalField::Population,
    CanonicalField::Area,
];

/// Finds the source column for a canonical field, or `None` if nothing
/// matches. Patterns are tried in priority order; for each pattern the
/// table's columns are scanned in order and the first match wins.
pub fn find_column(df: &DataFrame, field: CanonicalField) -> Option<String> {
    let columns: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .map(|name| (name.to_string(), normalize_header(name)))
        .collect();

    for pattern in field.compiled() {
        for (original, normalized) in &columns {
            if pattern.is_match(normalized) {
                return Some(original.clone());
            }
        }
    }
    None
}

/// Lowercases a header and strips all whitespace before matching.
fn normalize_header(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
