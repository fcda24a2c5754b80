use crate::error::ConfigError;
use crate::llm::factory::is_known_provider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Overrides the provider's default endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub extraction: ExtractionConfig,

    #[serde(default)]
    pub assistant: AssistantConfig,
}

fn default_provider() -> String {
    "minimax".into()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_model() -> String {
    "MiniMax-M2.1".into()
}

fn default_max_tokens() -> u32 {
    1024
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Left unset so the provider's own default applies.
    #[serde(default)]
    pub temperature: Option<f64>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_assistant_temperature")]
    pub temperature: Option<f64>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_assistant_temperature() -> Option<f64> {
    Some(0.7)
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_assistant_temperature(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_key: None,
            provider: default_provider(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            extraction: ExtractionConfig::default(),
            assistant: AssistantConfig::default(),
        }
    }
}

fn check_temperature(section: &str, temperature: Option<f64>) -> Result<(), ConfigError> {
    match temperature {
        Some(t) if !(0.0..=2.0).contains(&t) => Err(ConfigError::Validation(format!(
            "{section}.temperature must be within 0.0..=2.0, got {t}"
        ))),
        _ => Ok(()),
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_known_provider(&self.provider) {
            return Err(ConfigError::UnknownProvider(self.provider.clone()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        if self.extraction.max_tokens == 0 || self.assistant.max_tokens == 0 {
            return Err(ConfigError::Validation(
                "max_tokens must be greater than zero".into(),
            ));
        }
        check_temperature("extraction", self.extraction.temperature)?;
        check_temperature("assistant", self.assistant.temperature)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.provider, "minimax");
        assert_eq!(config.extraction.max_tokens, 1024);
        assert_eq!(config.extraction.temperature, None);
        assert_eq!(config.assistant.temperature, Some(0.7));
        config.validate().unwrap();
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
provider = "anthropic"

[extraction]
model = "claude-sonnet-4-20250514"
"#,
        )
        .unwrap();
        assert_eq!(config.provider, "anthropic");
        assert_eq!(config.extraction.model, "claude-sonnet-4-20250514");
        assert_eq!(config.extraction.max_tokens, 1024);
        assert_eq!(config.assistant.model, "MiniMax-M2.1");
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = Config::default();
        config.assistant.temperature = Some(2.5);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("assistant.temperature"));
    }

    #[test]
    fn rejects_unknown_provider() {
        let config = Config {
            provider: "carrier-pigeon".into(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownProvider(name)) if name == "carrier-pigeon"
        ));
    }

    #[test]
    fn rejects_zero_token_budget() {
        let mut config = Config::default();
        config.extraction.max_tokens = 0;
        assert!(config.validate().is_err());
    }
}
