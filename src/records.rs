//! Store-ready drafts built from extracted actions and structured replies.
//!
//! Nothing here performs I/O. The caller assigns identifiers and timestamps
//! and writes the drafts wherever it keeps records.

use crate::extraction::{ActionKind, ExtractedAction};
use crate::structured::{
    ActionStatus, AgendaEntry, AgendaKind, ConversationStructuredOutput, ReplyAction,
    ReplyActionKind,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_AGENDA_DURATION: &str = "30 min";

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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StoreActionType {
    CalendarEvent,
    Email,
    Task,
}

impl From<ReplyActionKind> for StoreActionType {
    fn from(kind: ReplyActionKind) -> Self {
        match kind {
            ReplyActionKind::Calendar | ReplyActionKind::Agenda => Self::CalendarEvent,
            ReplyActionKind::Email => Self::Email,
            ReplyActionKind::Task => Self::Task,
        }
    }
}

impl From<ActionKind> for StoreActionType {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Calendar => Self::CalendarEvent,
            ActionKind::Email => Self::Email,
            ActionKind::Task => Self::Task,
        }
    }
}

/// Stored status: `scheduled` and `completed` survive, everything else is `pending`.
fn store_status(status: Option<ActionStatus>) -> ActionStatus {
    match status {
        Some(kept @ (ActionStatus::Scheduled | ActionStatus::Completed)) => kept,
        Some(ActionStatus::Pending) | None => ActionStatus::Pending,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDraft {
    pub session_id: String,
    #[serde(rename = "type")]
    pub kind: StoreActionType,
    pub title: String,
    pub description: String,
    pub payload: Map<String, Value>,
    pub status: ActionStatus,
}

impl ActionDraft {
    pub fn from_reply_action(action: &ReplyAction, session_id: &str) -> Self {
        Self {
            session_id: session_id.to_string(),
            kind: action.kind.into(),
            title: action.title.clone(),
            description: action.description.clone(),
            payload: Map::new(),
            status: store_status(action.status),
        }
    }

    /// Extracted actions start out pending; `details` and `canAutomate` ride in the payload.
    pub fn from_extracted(action: &ExtractedAction, session_id: &str) -> Self {
        let mut payload = Map::new();
        payload.insert("canAutomate".into(), Value::Bool(action.can_automate));
        if let Some(details) = &action.details {
            payload.insert("details".into(), Value::String(details.clone()));
        }

        Self {
            session_id: session_id.to_string(),
            kind: action.kind.into(),
            title: action.title.clone(),
            description: action.description.clone(),
            payload,
            status: ActionStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaDraft {
    pub time: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AgendaKind,
    pub duration: String,
    /// `time` resolved on the scheduled day; midnight when `time` is unreadable.
    pub date: NaiveDateTime,
}

impl AgendaDraft {
    pub fn from_entry(entry: &AgendaEntry, day: NaiveDate) -> Self {
        let duration = if entry.duration.trim().is_empty() {
            DEFAULT_AGENDA_DURATION.to_string()
        } else {
            entry.duration.clone()
        };

        Self {
            time: entry.time.clone(),
            title: entry.title.clone(),
            kind: entry.kind,
            duration,
            date: time_on_day(&entry.time, day),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDrafts {
    pub actions: Vec<ActionDraft>,
    pub agenda_items: Vec<AgendaDraft>,
}

pub fn drafts_from_output(
    output: &ConversationStructuredOutput,
    session_id: &str,
    day: NaiveDate,
) -> RecordDrafts {
    RecordDrafts {
        actions: output
            .actions()
            .iter()
            .map(|action| ActionDraft::from_reply_action(action, session_id))
            .collect(),
        agenda_items: output
            .agenda_items()
            .iter()
            .map(|entry| AgendaDraft::from_entry(entry, day))
            .collect(),
    }
}

/// `time` on `day`, or midnight of `day` if no clock time can be read.
pub fn time_on_day(time: &str, day: NaiveDate) -> NaiveDateTime {
    day.and_time(parse_time_of_day(time).unwrap_or(NaiveTime::MIN))
}

/// Find the first `H:MM AM|PM` clock time in `text`.
///
/// The meridiem is case-insensitive and may follow the minutes with or
/// without whitespace. Hours run 0-12 and minutes 0-59.
pub fn parse_time_of_day(text: &str) -> Option<NaiveTime> {
    let bytes = text.as_bytes();

    for (colon, _) in text.match_indices(':') {
        let Some(hour_start) = (colon.saturating_sub(2)..colon)
            .find(|&i| bytes[i..colon].iter().all(u8::is_ascii_digit))
        else {
            continue;
        };
        let Some(minute_digits) = bytes.get(colon + 1..colon + 3) else {
            continue;
        };
        if !minute_digits.iter().all(u8::is_ascii_digit) {
            continue;
        }

        let rest = text[colon + 3..].trim_start();
        let Some(meridiem) = rest.get(..2).map(str::to_ascii_uppercase) else {
            continue;
        };
        let is_pm = match meridiem.as_str() {
            "AM" => false,
            "PM" => true,
            _ => continue,
        };

        let hours: u32 = text[hour_start..colon].parse().ok()?;
        let minutes: u32 = text[colon + 1..colon + 3].parse().ok()?;
        if hours > 12 || minutes > 59 {
            return None;
        }
        let hours = match (is_pm, hours) {
            (true, 12) => 12,
            (true, h) => h + 12,
            (false, 12) => 0,
            (false, h) => h,
        };
        return NaiveTime::from_hms_opt(hours, minutes, 0);
    }

    None
}
