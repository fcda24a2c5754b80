use super::{ActionKind, ExtractedAction};
use crate::structured::validate::{
    Rejection, check_all, coerce_flag, coerce_optional_text, coerce_text, keep_accepted,
    parse_kind, require_fields,
};
use serde_json::Value;

const FENCE: &str = "```";

/// Turn raw model text into validated actions.
///
/// Never fails: anything that is not a JSON array of action objects
/// degrades to an empty list, and bad elements are dropped one by one.
pub fn parse_extraction_output(text: &str) -> Vec<ExtractedAction> {
    let stripped = strip_code_fence(text);
    let candidate = locate_array(stripped);

    if candidate.is_empty() {
        tracing::warn!(raw_len = text.len(), "No content to parse in extraction output");
        return Vec::new();
    }

    let parsed: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(%error, candidate, "Extraction output is not valid JSON");
            return Vec::new();
        }
    };

    let Value::Array(elements) = parsed else {
        tracing::warn!("Extraction output is not a JSON array");
        return Vec::new();
    };

    keep_accepted(check_all(&elements, check_action), "extracted action")
}

/// Drop a leading ```` ``` ````/```` ```json ```` marker and a trailing ```` ``` ````.
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let mut rest = text.trim();
    if let Some(after) = rest.strip_prefix(FENCE) {
        rest = after.strip_prefix("json").unwrap_or(after).trim_start();
    }
    if let Some(before) = rest.strip_suffix(FENCE) {
        rest = before.trim_end();
    }
    rest.trim()
}

/// The array literal to parse: the whole text if it already is one, else
/// the span from the first `[` to the last `]`.
pub(crate) fn locate_array(text: &str) -> &str {
    if text.starts_with('[') && text.ends_with(']') {
        return text;
    }
    match (text.find('['), text.rfind(']')) {
        (Some(open), Some(close)) if open < close => &text[open..=close],
        _ => text,
    }
}

fn check_action(element: &Value) -> Result<ExtractedAction, Rejection> {
    let object = require_fields(element, &["type", "title", "description"])?;
    let kind: ActionKind = parse_kind(object.get("type"))?;

    Ok(ExtractedAction {
        kind,
        title: coerce_text(object.get("title")),
        description: coerce_text(object.get("description")),
        can_automate: coerce_flag(object.get("canAutomate"), true),
        details: coerce_optional_text(object.get("details")),
    })
}
