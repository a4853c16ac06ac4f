//! JSON value coercion shared by the builders. `null` always means "no value".

use serde_json::Value;

use super::{SearchBuildError, SearchResult};
use crate::contract::search::{FilterKey, SearchFilter};

fn invalid(key: FilterKey, expected: &'static str, got: &Value) -> SearchBuildError {
    let mut got = got.to_string();
    if got.len() > 64 {
        let mut cut = 64;
        while !got.is_char_boundary(cut) {
            cut -= 1;
        }
        got.truncate(cut);
        got.push_str("...");
    }
    SearchBuildError::InvalidValue { key, expected, got }
}

/// A JSON number kept exact: integral input stays integral, fractional input
/// stays a float so comparisons against integer columns are not rounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Numeric {
    Int(i64),
    Real(f64),
}

pub(super) fn as_numeric(key: FilterKey, value: &Value) -> SearchResult<Option<Numeric>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(Numeric::Int(i)));
            }
            match n.as_f64() {
                Some(f) if f.is_finite() => Ok(Some(Numeric::Real(f))),
                _ => Err(invalid(key, "a number", value)),
            }
        }
        other => Err(invalid(key, "a number", other)),
    }
}

pub(super) fn as_f64(key: FilterKey, value: &Value) -> SearchResult<Option<f64>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(key, "a number", value)),
        other => Err(invalid(key, "a number", other)),
    }
}

/// Non-blank string; blank strings are treated like `null`.
pub(super) fn as_text(key: FilterKey, value: &Value) -> SearchResult<Option<&str>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.as_str())),
        other => Err(invalid(key, "a string", other)),
    }
}

pub(super) fn as_bool(key: FilterKey, value: &Value) -> SearchResult<Option<bool>> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(*b)),
        other => Err(invalid(key, "a boolean", other)),
    }
}

pub(super) fn as_string_item<'a>(
    key: FilterKey,
    expected: &'static str,
    value: &'a Value,
) -> SearchResult<&'a str> {
    value.as_str().ok_or_else(|| invalid(key, expected, value))
}

pub(super) fn unparseable(key: FilterKey, expected: &'static str, value: &Value) -> SearchBuildError {
    invalid(key, expected, value)
}

/// `values` when present and non-empty.
pub(super) fn set_values(filter: &SearchFilter) -> Option<&[Value]> {
    filter
        .values
        .as_deref()
        .filter(|values| !values.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_keep_their_exact_value() {
        let k = FilterKey::Servings;
        assert_eq!(as_numeric(k, &json!(4)).unwrap(), Some(Numeric::Int(4)));
        assert_eq!(as_numeric(k, &json!(4.9)).unwrap(), Some(Numeric::Real(4.9)));
        assert_eq!(as_numeric(k, &json!(-2.5)).unwrap(), Some(Numeric::Real(-2.5)));
        assert_eq!(as_numeric(k, &Value::Null).unwrap(), None);
        assert!(matches!(
            as_numeric(k, &json!("four")),
            Err(SearchBuildError::InvalidValue { key: FilterKey::Servings, .. })
        ));
    }

    #[test]
    fn blank_text_is_no_value() {
        let k = FilterKey::Name;
        assert_eq!(as_text(k, &json!("  ")).unwrap(), None);
        assert_eq!(as_text(k, &json!("tart")).unwrap(), Some("tart"));
        assert!(as_text(k, &json!(12)).is_err());
    }

    #[test]
    fn booleans_are_strict() {
        let k = FilterKey::OwnedByUser;
        assert_eq!(as_bool(k, &json!(true)).unwrap(), Some(true));
        assert_eq!(as_bool(k, &Value::Null).unwrap(), None);
        assert!(as_bool(k, &json!("true")).is_err());
    }

    #[test]
    fn empty_value_lists_are_absent() {
        use crate::contract::search::Operator;

        let empty = SearchFilter::set(FilterKey::Tags, Operator::Any, Vec::<Value>::new());
        assert!(set_values(&empty).is_none());
        let missing = SearchFilter::scalar(FilterKey::Tags, Operator::Any, Value::Null);
        assert!(set_values(&missing).is_none());
        let some = SearchFilter::set(FilterKey::Tags, Operator::Any, ["Pie"]);
        assert_eq!(set_values(&some).map(<[Value]>::len), Some(1));
    }

    #[test]
    fn long_values_are_truncated_in_errors() {
        let long = json!("x".repeat(500));
        match as_numeric(FilterKey::Servings, &long) {
            Err(SearchBuildError::InvalidValue { got, .. }) => assert!(got.len() <= 67),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
