use crate::error::LlmError;
use std::borrow::Cow;

const MAX_API_ERROR_CHARS: usize = 200;

const REDACTED: &str = "[REDACTED]";

/// Token prefixes of provider credentials that may be echoed back in error bodies.
const PREFIX_PATTERNS: [&str; 2] = ["sk-", "eyJ"];

const MARKER_PATTERNS: [&str; 10] = [
    "Authorization: Bearer ",
    "authorization: bearer ",
    "\"authorization\":\"Bearer ",
    "x-api-key: ",
    "xi-api-key: ",
    "api_key=",
    "access_token=",
    "\"api_key\":\"",
    "\"access_token\":\"",
    "\"token\":\"",
];

/// Byte length of the credential-looking run at the start of `s`.
fn secret_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_ascii_alphanumeric() || "-_.:+/=".contains(c)))
        .unwrap_or(s.len())
}

/// Replace every `needle` plus the token glued to it. Bare needles stay.
fn redact_after(text: &mut String, needle: &str) {
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(needle).map(|i| cursor + i) {
        let value_start = found + needle.len();
        let value_len = secret_len(&text[value_start..]);
        if value_len == 0 {
            cursor = value_start;
            continue;
        }
        text.replace_range(found..value_start + value_len, REDACTED);
        cursor = found + REDACTED.len();
    }
}

/// Scrub credential-like tokens from provider error strings.
///
/// Redacts `sk-…` keys, JWT-looking tokens, and values after common
/// header/query/json markers such as `x-api-key: …` or `"api_key":"…"`.
pub fn scrub_secret_patterns(input: &str) -> Cow<'_, str> {
    let needles = MARKER_PATTERNS.iter().chain(PREFIX_PATTERNS.iter());
    if !needles.clone().any(|needle| input.contains(needle)) {
        return Cow::Borrowed(input);
    }

    let mut scrubbed = input.to_owned();
    for needle in needles {
        redact_after(&mut scrubbed, needle);
    }
    Cow::Owned(scrubbed)
}

/// Scrub secrets, then cap the text at 200 characters.
pub fn sanitize_api_error(input: &str) -> String {
    let scrubbed = scrub_secret_patterns(input);
    match scrubbed.char_indices().nth(MAX_API_ERROR_CHARS) {
        Some((cut, _)) => format!("{}...", &scrubbed[..cut]),
        None => scrubbed.into_owned(),
    }
}

/// Build a sanitized provider error from a failed HTTP response.
pub async fn api_error(provider: &str, response: reqwest::Response) -> LlmError {
    let status = response.status();
    let message = match response.text().await {
        Ok(body) => sanitize_api_error(&body),
        Err(error) => format!("<unreadable error body: {error}>"),
    };

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return LlmError::Auth {
            provider: provider.to_string(),
            message,
        };
    }

    LlmError::Api {
        provider: provider.to_string(),
        status: status.as_u16(),
        message,
    }
}

/// Map a transport-level `reqwest` failure into an [`LlmError`].
pub fn request_error(provider: &str, error: &reqwest::Error) -> LlmError {
    LlmError::Request {
        provider: provider.to_string(),
        message: sanitize_api_error(&error.to_string()),
    }
}
