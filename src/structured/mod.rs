//! Reply splitting: the human-readable part of an assistant reply and the
//! optional trailing fenced JSON payload.

mod fence;
mod types;
pub mod validate;

pub use fence::{FencedBlock, last_fenced_block, scan_fenced_blocks};
pub use types::{
    ActionStatus, AgendaEntry, AgendaKind, ConversationStructuredOutput, ReplyAction,
    ReplyActionKind,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedReply {
    /// Text to speak or display. Never contains the selected payload block.
    pub reply_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured: Option<ConversationStructuredOutput>,
}

impl ParsedReply {
    fn text_only(reply_text: impl Into<String>) -> Self {
        Self {
            reply_text: reply_text.into(),
            structured: None,
        }
    }
}

/// Split an assistant reply into its visible text and structured payload.
///
/// The last fenced block is the payload candidate. Everything before it
/// becomes the visible text, and the block is dropped whether or not its
/// interior parses. Only a JSON object yields a structured result.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let trimmed = reply.trim();

    let Some(block) = last_fenced_block(trimmed) else {
        return ParsedReply::text_only(trimmed);
    };

    let reply_text = trimmed[..block.start].trim();
    let structured = match serde_json::from_str::<Value>(block.body.trim()) {
        Ok(Value::Object(object)) => Some(ConversationStructuredOutput::from_object(&object)),
        Ok(other) => {
            tracing::warn!(
                is_array = other.is_array(),
                "Structured payload is not a JSON object; ignoring it"
            );
            None
        }
        Err(error) => {
            tracing::warn!(%error, len = block.body.len(), "Structured payload is not valid JSON");
            None
        }
    };

    ParsedReply {
        reply_text: reply_text.to_string(),
        structured,
    }
}
