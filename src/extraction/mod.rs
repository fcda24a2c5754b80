//! Action-item extraction from free text.
//!
//! One model call per non-empty input; everything the model returns is
//! validated locally and malformed output degrades to an empty list.

mod payload;

pub use payload::parse_extraction_output;

use crate::config::ExtractionConfig;
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, Provider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const EXTRACTION_SYSTEM_PROMPT: &str = "\
You are an executive assistant. Extract action items from the user's raw thoughts or brain dump.

Return a JSON array of actions. Each action must have:
- type: one of \"calendar\", \"email\", \"task\"
- title: short action title
- description: one line describing what to do (e.g. \"Tomorrow at 2pm with marketing@company.com\", \"Re: Project update to client@example.com\")
- canAutomate: true if we can create a calendar event, send an email, or create a task; false for manual-only items
- details: optional extra context (e.g. draft subject line, suggested time)

Be concise. Only output valid JSON, no markdown or extra text.";

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
pub enum ActionKind {
    Calendar,
    Email,
    Task,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub title: String,
    pub description: String,
    pub can_automate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

pub struct ActionExtractor {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl ActionExtractor {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: 1024,
            temperature: None,
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &ExtractionConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    fn build_request(&self, trimmed: &str) -> CompletionRequest {
        CompletionRequest::new(
            self.model.as_str(),
            vec![ChatMessage::user(format!(
                "Extract action items from this:\n\n{trimmed}"
            ))],
        )
        .with_system(EXTRACTION_SYSTEM_PROMPT)
        .with_max_tokens(self.max_tokens)
        .with_temperature(self.temperature)
    }

    /// Extract action items from `raw_text`.
    ///
    /// Blank input returns an empty list without calling the model. Only a
    /// failed model call is an error.
    pub async fn extract(&self, raw_text: &str) -> Result<Vec<ExtractedAction>, LlmError> {
        let trimmed = raw_text.trim();
        if trimmed.is_empty() {
            return Ok(Vec::new());
        }

        tracing::info!(
            provider = self.provider.name(),
            model = %self.model,
            len = trimmed.len(),
            "Extracting action items"
        );

        let request = self.build_request(trimmed);
        let response = self.provider.complete(&request).await?;

        for thinking in response.reasoning() {
            tracing::debug!(thinking, "Extraction reasoning");
        }
        let text = response.visible_text();
        tracing::debug!(raw = %text, len = text.len(), "Raw extraction output");

        let actions = parse_extraction_output(&text);
        tracing::info!(count = actions.len(), "Extracted action items");
        Ok(actions)
    }
}
