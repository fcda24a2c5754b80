#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_literal_bound,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::new_without_default,
    clippy::return_self_not_must_use
)]

pub mod config;
pub mod conversation;
pub mod error;
pub mod extraction;
pub mod llm;
pub mod records;
pub mod structured;

pub use config::Config;
pub use conversation::Assistant;
pub use error::{ConfigError, Error, LlmError, Result};
pub use extraction::{ActionExtractor, ExtractedAction};
pub use structured::{ConversationStructuredOutput, ParsedReply, parse_reply};
