// ── Infrastructure ───────────────────────────────────────────────────────────
pub mod http_client;
pub mod scrub;
pub mod traits;
pub mod types;

#[cfg(test)]
pub(crate) mod scripted;

// ── Provider implementations ────────────────────────────────────────────────
pub mod anthropic;
pub mod compatible;
pub mod factory;

// ── Infrastructure re-exports ───────────────────────────────────────────────
pub use http_client::build_provider_client_with_timeout;
pub use scrub::{api_error, sanitize_api_error, scrub_secret_patterns};
pub use traits::{Provider, ProviderFuture};
pub use types::{ChatMessage, CompletionRequest, ContentSegment, MessageRole, ProviderResponse};

// ── Provider + factory re-exports ───────────────────────────────────────────
pub use anthropic::AnthropicProvider;
pub use compatible::OpenAiCompatibleProvider;
pub use factory::{create_provider, create_provider_from_config, resolve_api_key};
