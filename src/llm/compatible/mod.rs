//! Generic OpenAI-compatible provider.
//! Most LLM APIs follow the same `/chat/completions` format; this one
//! implementation serves `OpenAI` and `MiniMax`'s compatible endpoint.

use crate::error::LlmError;
use crate::llm::{
    ContentSegment, MessageRole, ProviderResponse, build_provider_client_with_timeout,
    http_client::DEFAULT_REQUEST_TIMEOUT_SECS,
    scrub::{api_error, request_error},
    traits::{Provider, ProviderFuture},
    types::CompletionRequest,
};
use reqwest::Client;
use std::ops::RangeInclusive;

mod types;
use types::{ChatRequest, ChatResponse, Message};

const THINK_OPEN_TAG: &str = "<think>";
const THINK_CLOSE_TAG: &str = "</think>";

pub struct OpenAiCompatibleProvider {
    pub(crate) name: String,
    credential_hint: &'static str,
    /// Pre-computed `Authorization: Bearer <key>` value.
    cached_auth: Option<String>,
    /// Pre-computed chat completions URL (avoids `format!` per request).
    cached_chat_url: String,
    temperature_bounds: RangeInclusive<f64>,
    client: Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(
        name: &str,
        base_url: &str,
        api_key: Option<&str>,
        credential_hint: &'static str,
    ) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let cached_chat_url = if base_url.ends_with("chat/completions") {
            base_url.to_string()
        } else {
            format!("{base_url}/chat/completions")
        };

        Self {
            name: name.to_string(),
            credential_hint,
            cached_auth: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            cached_chat_url,
            temperature_bounds: 0.0..=2.0,
            client: build_provider_client_with_timeout(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Clamp requested temperatures into the range the backend accepts.
    pub fn with_temperature_bounds(mut self, min: f64, max: f64) -> Self {
        self.temperature_bounds = min..=max;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = build_provider_client_with_timeout(timeout_secs);
        self
    }

    fn chat_completions_url(&self) -> &str {
        &self.cached_chat_url
    }

    fn build_request<'a>(&self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = request.system.as_deref() {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.extend(request.messages.iter().map(|message| Message {
            role: match message.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            },
            content: &message.content,
        }));

        ChatRequest {
            model: &request.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature.map(|t| {
                t.clamp(
                    *self.temperature_bounds.start(),
                    *self.temperature_bounds.end(),
                )
            }),
        }
    }

    fn into_provider_response(chat_response: ChatResponse) -> ProviderResponse {
        let mut segments = Vec::new();
        if let Some(choice) = chat_response.choices.into_iter().next() {
            if let Some(reasoning) = choice
                .message
                .reasoning_content
                .filter(|r| !r.trim().is_empty())
            {
                segments.push(ContentSegment::Reasoning { text: reasoning });
            }
            if let Some(content) = choice.message.content {
                segments.extend(split_think_tags(&content));
            }
        }

        let mut response = ProviderResponse::from_segments(segments);
        if let Some(usage) = chat_response.usage {
            response = response.with_usage(usage.prompt_tokens, usage.completion_tokens);
        }
        if let Some(model) = chat_response.model {
            response = response.with_model(model);
        }
        response
    }

    async fn call_chat_completions(
        &self,
        request: &CompletionRequest,
    ) -> Result<ChatResponse, LlmError> {
        let auth = self
            .cached_auth
            .as_ref()
            .ok_or_else(|| LlmError::MissingCredentials {
                provider: self.name.clone(),
                hint: self.credential_hint.to_string(),
            })?;

        let response = self
            .client
            .post(self.chat_completions_url())
            .header("Authorization", auth)
            .json(&self.build_request(request))
            .send()
            .await
            .map_err(|error| request_error(&self.name, &error))?;

        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await);
        }

        response.json().await.map_err(|error| LlmError::Decode {
            provider: self.name.clone(),
            message: error.to_string(),
        })
    }
}

/// Split inline `<think>…</think>` spans out of a completion.
///
/// An unterminated `<think>` swallows the rest of the text as reasoning.
fn split_think_tags(content: &str) -> Vec<ContentSegment> {
    let mut segments = Vec::new();
    let mut search_start = 0;

    while let Some(open_offset) = content[search_start..].find(THINK_OPEN_TAG) {
        let open_index = search_start + open_offset;
        push_text(&mut segments, &content[search_start..open_index]);

        let reasoning_start = open_index + THINK_OPEN_TAG.len();
        if let Some(close_offset) = content[reasoning_start..].find(THINK_CLOSE_TAG) {
            let close_index = reasoning_start + close_offset;
            segments.push(ContentSegment::Reasoning {
                text: content[reasoning_start..close_index].trim().to_string(),
            });
            search_start = close_index + THINK_CLOSE_TAG.len();
        } else {
            segments.push(ContentSegment::Reasoning {
                text: content[reasoning_start..].trim().to_string(),
            });
            return segments;
        }
    }

    push_text(&mut segments, &content[search_start..]);
    segments
}

fn push_text(segments: &mut Vec<ContentSegment>, text: &str) {
    if !text.trim().is_empty() {
        segments.push(ContentSegment::Text {
            text: text.to_string(),
        });
    }
}

impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse> {
        Box::pin(async move {
            let chat_response = self.call_chat_completions(request).await?;
            Ok(Self::into_provider_response(chat_response))
        })
    }
}
