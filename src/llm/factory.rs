use super::anthropic::AnthropicProvider;
use super::compatible::OpenAiCompatibleProvider;
use super::traits::Provider;
use crate::config::Config;
use crate::error::ConfigError;
use std::sync::Arc;

const KNOWN_PROVIDERS: [&str; 4] = ["anthropic", "minimax", "openai", "minimax-openai"];

pub fn is_known_provider(name: &str) -> bool {
    KNOWN_PROVIDERS.contains(&name)
}

fn credential_env_vars(name: &str) -> &'static [&'static str] {
    match name {
        "anthropic" => &["ANTHROPIC_OAUTH_TOKEN", "ANTHROPIC_API_KEY"],
        "minimax" | "minimax-openai" => &["MINIMAX_API_KEY"],
        "openai" => &["OPENAI_API_KEY"],
        _ => &[],
    }
}

/// Resolve the API key for `name`: explicit key first, then the provider's env vars.
pub fn resolve_api_key(name: &str, explicit_api_key: Option<&str>) -> Option<String> {
    if let Some(key) = explicit_api_key.map(str::trim).filter(|k| !k.is_empty()) {
        return Some(key.to_string());
    }

    for env_var in credential_env_vars(name) {
        if let Ok(value) = std::env::var(env_var) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }

    None
}

pub fn create_provider(
    name: &str,
    api_key: Option<&str>,
    base_url: Option<&str>,
    timeout_secs: u64,
) -> Result<Arc<dyn Provider>, ConfigError> {
    let resolved_key = resolve_api_key(name, api_key);
    let api_key = resolved_key.as_deref();

    let provider: Arc<dyn Provider> = match name {
        "anthropic" => Arc::new(
            AnthropicProvider::with_base_url(api_key, base_url).with_timeout(timeout_secs),
        ),
        "minimax" => Arc::new(
            AnthropicProvider::with_base_url(
                api_key,
                Some(base_url.unwrap_or("https://api.minimax.io/anthropic")),
            )
            .named("minimax", "MINIMAX_API_KEY")
            .with_timeout(timeout_secs),
        ),
        "openai" => Arc::new(
            OpenAiCompatibleProvider::new(
                "openai",
                base_url.unwrap_or("https://api.openai.com/v1"),
                api_key,
                "OPENAI_API_KEY",
            )
            .with_timeout(timeout_secs),
        ),
        "minimax-openai" => Arc::new(
            OpenAiCompatibleProvider::new(
                "minimax-openai",
                base_url.unwrap_or("https://api.minimax.io/v1"),
                api_key,
                "MINIMAX_API_KEY",
            )
            .with_temperature_bounds(0.01, 1.0)
            .with_timeout(timeout_secs),
        ),
        _ => return Err(ConfigError::UnknownProvider(name.to_string())),
    };

    tracing::debug!(provider = name, "Created LLM provider");
    Ok(provider)
}

pub fn create_provider_from_config(config: &Config) -> Result<Arc<dyn Provider>, ConfigError> {
    create_provider(
        &config.provider,
        config.api_key.as_deref(),
        config.base_url.as_deref(),
        config.request_timeout_secs,
    )
}
