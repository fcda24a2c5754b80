//! One voice-first assistant turn: history in, split reply out.

use crate::config::AssistantConfig;
use crate::error::LlmError;
use crate::llm::{ChatMessage, CompletionRequest, Provider};
use crate::structured::{ParsedReply, parse_reply};
use std::sync::Arc;

pub const ASSISTANT_SYSTEM_PROMPT: &str = r#"You are a voice-first executive assistant. The user speaks freely; you turn their brain dumps into clear understanding and real actions.

Behavior:
- Be conversational and voice-first. Keep replies concise enough to speak naturally (a few sentences).
- Always reflect what you heard before acting or asking questions ("Here's what I heard…").
- Ask at most 2 clarifying questions when something is ambiguous.
- Use a calm, confident, slightly sassy tone. Push back politely when the user is vague or avoiding action.
- Prioritize action over perfection. When you have enough to act, say what you'll do (calendar, email, tasks, agenda).
- Do not repeat long lists back; summarize and confirm.

When you create or plan concrete actions (calendar events, emails, tasks) or agenda items, you MUST append a JSON block at the very end of your reply so the UI can show them. Use this exact format, with nothing else after it:

```json
{"actions":[{"type":"calendar","title":"Marketing Team Sync","description":"Tomorrow at 2:00 PM","status":"scheduled"}],"agendaItems":[{"time":"2:00 PM","title":"Marketing Sync","type":"meeting","duration":"30 min"}]}
```

Rules for the JSON block:
- "actions": array of items you created or will create. type is one of: calendar, email, task, agenda. status is one of: scheduled, pending, completed. title and description are short strings.
- "agendaItems": array of calendar/agenda entries. time (e.g. "2:00 PM"), title, type (meeting, call, review, focus), duration (e.g. "30 min").
- Only include the block when you actually created or confirmed at least one action or agenda item. Omit the entire block if you're only asking questions or reflecting.
- Your spoken reply should be natural; the JSON is for the UI only."#;

pub struct Assistant {
    provider: Arc<dyn Provider>,
    model: String,
    max_tokens: u32,
    temperature: Option<f64>,
}

impl Assistant {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: 1024,
            temperature: Some(0.7),
        }
    }

    pub fn from_config(provider: Arc<dyn Provider>, config: &AssistantConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    /// Run one turn over `history` (oldest first) and split the answer.
    ///
    /// An empty history yields an empty reply without calling the model.
    pub async fn respond(&self, history: &[ChatMessage]) -> Result<ParsedReply, LlmError> {
        if history.is_empty() {
            return Ok(ParsedReply::default());
        }

        let request = CompletionRequest::new(self.model.as_str(), history.to_vec())
            .with_system(ASSISTANT_SYSTEM_PROMPT)
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        tracing::info!(
            provider = self.provider.name(),
            model = %self.model,
            turns = history.len(),
            "Requesting assistant reply"
        );
        let response = self.provider.complete(&request).await?;
        for thinking in response.reasoning() {
            tracing::debug!(thinking, "Assistant reasoning");
        }

        let reply = parse_reply(&response.visible_text());
        tracing::debug!(
            has_structured = reply.structured.is_some(),
            reply_len = reply.reply_text.len(),
            "Assistant reply parsed"
        );
        Ok(reply)
    }
}
