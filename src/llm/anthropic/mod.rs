use crate::error::LlmError;
use crate::llm::{
    ContentSegment, MessageRole, ProviderResponse, build_provider_client_with_timeout,
    http_client::DEFAULT_REQUEST_TIMEOUT_SECS,
    scrub::{api_error, request_error},
    traits::{Provider, ProviderFuture},
    types::CompletionRequest,
};
use reqwest::Client;

mod types;
use types::{ChatRequest, ChatResponse, Message, ResponseContentBlock};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Speaks the Anthropic Messages API. Also serves Anthropic-compatible
/// endpoints such as MiniMax's.
pub struct AnthropicProvider {
    name: String,
    /// Env var(s) named in the missing-credentials error.
    credential_hint: &'static str,
    /// Pre-computed auth: `("Authorization", "Bearer <token>")` or `("x-api-key", "<key>")`.
    cached_auth: Option<(&'static str, String)>,
    cached_messages_url: String,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, None)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let base = base_url
            .map_or(DEFAULT_BASE_URL, |u| u.trim_end_matches('/'))
            .to_string();
        let cached_messages_url = format!("{base}/v1/messages");
        let cached_auth = api_key.map(str::trim).filter(|k| !k.is_empty()).map(|k| {
            if Self::is_setup_token(k) {
                ("Authorization", format!("Bearer {k}"))
            } else {
                ("x-api-key", k.to_string())
            }
        });
        Self {
            name: "anthropic".to_string(),
            credential_hint: "ANTHROPIC_API_KEY or ANTHROPIC_OAUTH_TOKEN",
            cached_auth,
            cached_messages_url,
            client: build_provider_client_with_timeout(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    /// Rename the provider for logs and errors, e.g. when pointed at MiniMax.
    pub fn named(mut self, name: &str, credential_hint: &'static str) -> Self {
        self.name = name.to_string();
        self.credential_hint = credential_hint;
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.client = build_provider_client_with_timeout(timeout_secs);
        self
    }

    fn is_setup_token(token: &str) -> bool {
        token.starts_with("sk-ant-oat01-")
    }

    fn build_request(request: &CompletionRequest) -> ChatRequest<'_> {
        ChatRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            system: request.system.as_deref(),
            messages: request
                .messages
                .iter()
                .map(|message| Message {
                    role: match message.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "assistant",
                    },
                    content: &message.content,
                })
                .collect(),
            temperature: request.temperature,
        }
    }

    fn parse_content_blocks(blocks: Vec<ResponseContentBlock>) -> Vec<ContentSegment> {
        blocks
            .into_iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(ContentSegment::Text { text }),
                ResponseContentBlock::Thinking { thinking } => {
                    Some(ContentSegment::Reasoning { text: thinking })
                }
                ResponseContentBlock::Unsupported => None,
            })
            .collect()
    }

    fn into_provider_response(chat_response: ChatResponse) -> ProviderResponse {
        let mut response =
            ProviderResponse::from_segments(Self::parse_content_blocks(chat_response.content));
        if let Some(usage) = chat_response.usage {
            response = response.with_usage(usage.input_tokens, usage.output_tokens);
        }
        if let Some(model) = chat_response.model {
            response = response.with_model(model);
        }
        response
    }

    async fn call_api(&self, request: &CompletionRequest) -> Result<ChatResponse, LlmError> {
        let (auth_name, auth_value) =
            self.cached_auth
                .as_ref()
                .ok_or_else(|| LlmError::MissingCredentials {
                    provider: self.name.clone(),
                    hint: self.credential_hint.to_string(),
                })?;

        let response = self
            .client
            .post(&self.cached_messages_url)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .header(*auth_name, auth_value)
            .json(&Self::build_request(request))
            .send()
            .await
            .map_err(|error| request_error(&self.name, &error))?;

        if !response.status().is_success() {
            return Err(api_error(&self.name, response).await);
        }

        response
            .json()
            .await
            .map_err(|error| LlmError::Decode {
                provider: self.name.clone(),
                message: error.to_string(),
            })
    }
}

impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn complete<'a>(&'a self, request: &'a CompletionRequest) -> ProviderFuture<'a, ProviderResponse> {
        Box::pin(async move {
            let chat_response = self.call_api(request).await?;
            Ok(Self::into_provider_response(chat_response))
        })
    }
}
