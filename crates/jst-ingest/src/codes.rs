//! JST region-code normalization.
//!
//! Source files carry TERYT-style codes with dashes, spaces, checksum
//! suffixes, or spreadsheet float formatting. Normalization strips every
//! non-digit and truncates to the configured length so codes from
//! different sources join cleanly.

use jst_model::any_to_string;
use jst_model::kind::JST_CODE_COLUMN;
use polars::prelude::{AnyValue, Column, DataFrame, PolarsResult};

/// Canonicalizes one region-code value.
///
/// Null maps to null (represented as `None`); otherwise all non-digit
/// characters are stripped and the remainder truncated to `length`. An
/// empty result becomes `None`. Idempotent: normalizing an already
/// normalized code returns it unchanged.
pub fn normalize_code(value: &str, length: usize) -> Option<String> {
    let digits: String = value
        .chars()
        .filter(char::is_ascii_digit)
        .take(length)
        .collect();
    if digits.is_empty() { None } else { Some(digits) }
}

/// Replaces the `jst_code` column with its normalized form.
///
/// Other columns are untouched; the operation is column-wise and pure.
pub fn unify_jst_codes(df: &DataFrame, length: usize) -> PolarsResult<DataFrame> {
    let source = df.column(JST_CODE_COLUMN)?;
    let mut normalized: Vec<Option<String>> = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = source.get(idx).unwrap_or(AnyValue::Null);
        let code = match value {
            AnyValue::Null => None,
            other => normalize_code(&any_to_string(&other), length),
        };
        normalized.push(code);
    }

    let mut out = df.clone();
    out.replace(
        JST_CODE_COLUMN,
        Column::new(JST_CODE_COLUMN.into(), normalized).take_materialized_series(),
    )?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use proptest::prelude::*;

    #[test]
    fn strips_non_digits_and_truncates() {
        assert_eq!(normalize_code("12-345-67", 7).as_deref(), Some("1234567"));
        assert_eq!(normalize_code(" 1234567890", 7).as_deref(), Some("1234567"));
        assert_eq!(normalize_code("123", 7).as_deref(), Some("123"));
    }

    #[test]
    fn empty_result_is_null() {
        assert_eq!(normalize_code("", 7), None);
        assert_eq!(normalize_code("abc-", 7), None);
    }

    #[test]
    fn unify_replaces_only_the_code_column() {
        let raw = df!(
            "jst_code" => [Some("12-34567"), Some("x"), None],
            "year" => ["2020", "2020", "2020"],
        )
        .unwrap();
        let out = unify_jst_codes(&raw, 7).unwrap();
        let codes = out.column("jst_code").unwrap();
        assert_eq!(codes.null_count(), 2);
        assert_eq!(
            codes.get(0).unwrap(),
            AnyValue::String("1234567")
        );
        // year column untouched
        assert_eq!(out.column("year").unwrap().null_count(), 0);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(value in ".{0,32}", length in 1usize..12) {
            let once = normalize_code(&value, length);
            let twice = once
                .as_deref()
                .and_then(|v| normalize_code(v, length));
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn output_is_digits_within_length(value in ".{0,32}", length in 1usize..12) {
            if let Some(code) = normalize_code(&value, length) {
                prop_assert!(code.len() <= length);
                prop_assert!(code.chars().all(|c| c.is_ascii_digit()));
            }
        }
    }
}
