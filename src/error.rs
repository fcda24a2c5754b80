use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for `thoughtdesk`.
///
/// Only infrastructure failures are represented here. Malformed model output
/// never becomes an error; extraction and reply parsing degrade to an empty
/// result instead.
#[derive(Debug, Error)]
pub enum Error {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

/// Failure of the outbound model call itself.
///
/// Callers surface these as a generic failure; they mean the operation did
/// not happen at all.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} credentials not set (expected {hint})")]
    MissingCredentials { provider: String, hint: String },

    #[error("provider {provider} authentication failed: {message}")]
    Auth { provider: String, message: String },

    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("{provider} API error ({status}): {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("provider {provider} returned an undecodable response: {message}")]
    Decode { provider: String, message: String },
}

impl LlmError {
    pub fn provider(&self) -> &str {
        match self {
            Self::MissingCredentials { provider, .. }
            | Self::Auth { provider, .. }
            | Self::Request { provider, .. }
            | Self::Api { provider, .. }
            | Self::Decode { provider, .. } => provider,
        }
    }

    /// True for failures that a retry with the same credentials cannot fix.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingCredentials { .. } | Self::Auth { .. })
    }
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;
