//! Shape validation and normalization shared by the extractor and the
//! reply parser.
//!
//! Elements are checked one at a time and come back tagged as accepted or
//! rejected, so one bad element never sinks the batch. Every optional-field
//! default lives in this module.

use serde_json::{Map, Value};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Checked<T> {
    Accepted(T),
    Rejected { index: usize, reason: Rejection },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("element is not an object")]
    NotAnObject,
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unsupported `type` value {0}")]
    UnsupportedType(String),
}

/// Borrow `element` as an object that carries every field in `required`.
///
/// Presence is what counts: a field holding `null` is present.
pub fn require_fields<'a>(
    element: &'a Value,
    required: &[&'static str],
) -> Result<&'a Map<String, Value>, Rejection> {
    let object = element.as_object().ok_or(Rejection::NotAnObject)?;
    if let Some(missing) = required.iter().find(|field| !object.contains_key(**field)) {
        return Err(Rejection::MissingField(*missing));
    }
    Ok(object)
}

/// Parse the `type` field against an allow-list enum. Matching is exact.
pub fn parse_kind<K: FromStr>(value: Option<&Value>) -> Result<K, Rejection> {
    match value {
        Some(Value::String(s)) => {
            K::from_str(s).map_err(|_| Rejection::UnsupportedType(format!("\"{s}\"")))
        }
        Some(other) => Err(Rejection::UnsupportedType(other.to_string())),
        None => Err(Rejection::MissingField("type")),
    }
}

/// Coerce any JSON value to display text.
///
/// Missing and `null` become the empty string; scalars use their literal
/// form; arrays and objects are kept as compact JSON.
pub fn coerce_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Like [`coerce_text`], but missing and `null` stay absent.
pub fn coerce_optional_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        some => Some(coerce_text(some)),
    }
}

/// Coerce a JSON value to a flag, falling back to `default` when missing or `null`.
///
/// Strings accept `true`/`false`, `yes`/`no`, `1`/`0` (any case); any other
/// non-empty string is true. Numbers are true when non-zero. Arrays and
/// objects are true.
pub fn coerce_flag(value: Option<&Value>, default: bool) -> bool {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" => true,
            "false" | "0" | "no" | "" => false,
            _ => true,
        },
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// Run `check` over every element, tagging each result with its index.
pub fn check_all<T>(
    elements: &[Value],
    check: impl Fn(&Value) -> Result<T, Rejection>,
) -> Vec<Checked<T>> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| match check(element) {
            Ok(value) => Checked::Accepted(value),
            Err(reason) => Checked::Rejected { index, reason },
        })
        .collect()
}

/// Keep accepted elements in order; log and drop the rest.
pub fn keep_accepted<T>(checked: Vec<Checked<T>>, what: &str) -> Vec<T> {
    checked
        .into_iter()
        .filter_map(|item| match item {
            Checked::Accepted(value) => Some(value),
            Checked::Rejected { index, reason } => {
                tracing::debug!(index, %reason, "Dropping invalid {what}");
                None
            }
        })
        .collect()
}
