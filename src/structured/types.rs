use super::validate::{
    Rejection, check_all, coerce_optional_text, coerce_text, keep_accepted, parse_kind,
    require_fields,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReplyActionKind {
    Calendar,
    Email,
    Task,
    Agenda,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ActionStatus {
    Scheduled,
    Pending,
    Completed,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AgendaKind {
    Meeting,
    Call,
    Review,
    Focus,
}

/// An action the assistant says it created or will create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyAction {
    #[serde(rename = "type")]
    pub kind: ReplyActionKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActionStatus>,
}

/// A time-slotted entry for the daily schedule view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntry {
    /// Display time, e.g. "2:00 PM".
    pub time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AgendaKind,
    /// Display duration, e.g. "30 min".
    pub duration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStructuredOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ReplyAction>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agenda_items: Option<Vec<AgendaEntry>>,
}

impl ConversationStructuredOutput {
    /// Build from a parsed payload object, validating each list element.
    ///
    /// A key holding anything other than an array is treated as absent.
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            actions: element_list(object, "actions")
                .map(|elements| keep_accepted(check_all(elements, check_action), "reply action")),
            agenda_items: element_list(object, "agendaItems")
                .map(|elements| keep_accepted(check_all(elements, check_agenda_entry), "agenda item")),
        }
    }

    pub fn actions(&self) -> &[ReplyAction] {
        self.actions.as_deref().unwrap_or_default()
    }

    pub fn agenda_items(&self) -> &[AgendaEntry] {
        self.agenda_items.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.actions().is_empty() && self.agenda_items().is_empty()
    }
}

fn element_list<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a [Value]> {
    match object.get(key) {
        Some(Value::Array(elements)) => Some(elements),
        Some(other) => {
            tracing::debug!(key, kind = json_kind(other), "Ignoring non-array payload field");
            None
        }
        None => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_action(element: &Value) -> Result<ReplyAction, Rejection> {
    let object = require_fields(element, &["type", "title"])?;
    let status = object
        .get("status")
        .and_then(Value::as_str)
        .and_then(|s| s.parse::<ActionStatus>().ok());

    Ok(ReplyAction {
        kind: parse_kind(object.get("type"))?,
        title: coerce_text(object.get("title")),
        description: coerce_text(object.get("description")),
        status,
    })
}

fn check_agenda_entry(element: &Value) -> Result<AgendaEntry, Rejection> {
    let object = require_fields(element, &["type", "title", "time"])?;

    Ok(AgendaEntry {
        time: coerce_text(object.get("time")),
        title: coerce_text(object.get("title")),
        kind: parse_kind(object.get("type"))?,
        duration: coerce_optional_text(object.get("duration")).unwrap_or_default(),
    })
}
