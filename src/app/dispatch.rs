use crate::app::status::render_status;
use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use thoughtdesk::Config;
use thoughtdesk::conversation::Assistant;
use thoughtdesk::extraction::ActionExtractor;
use thoughtdesk::llm::{ChatMessage, Provider, create_provider_from_config};
use thoughtdesk::records::drafts_from_output;
use thoughtdesk::structured::parse_reply;
use tokio::io::AsyncReadExt;
use tracing::info;

/// Positional text, or stdin when the argument is `-` or missing.
async fn read_input(text: Option<String>) -> Result<String> {
    match text {
        Some(text) if text != "-" => Ok(text),
        _ => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn provider(config: &Config) -> Result<Arc<dyn Provider>> {
    create_provider_from_config(config)
        .with_context(|| format!("failed to create provider `{}`", config.provider))
}

/// Turn alternating CLI arguments into a history that starts with the user.
fn history_from_args(messages: Vec<String>) -> Vec<ChatMessage> {
    messages
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            if i % 2 == 0 {
                ChatMessage::user(content)
            } else {
                ChatMessage::assistant(content)
            }
        })
        .collect()
}

pub async fn dispatch(cli: Cli, config: Arc<Config>) -> Result<()> {
    match cli.command {
        Commands::Extract { text } => {
            let text = read_input(text).await?;
            let extractor = ActionExtractor::from_config(provider(&config)?, &config.extraction);
            let actions = extractor
                .extract(&text)
                .await
                .context("action extraction failed")?;
            if actions.is_empty() {
                info!("No action items found");
            }
            print_json(&actions)
        }

        Commands::ParseReply { text } => {
            let text = read_input(text).await?;
            print_json(&parse_reply(&text))
        }

        Commands::Chat { messages } => {
            let assistant = Assistant::from_config(provider(&config)?, &config.assistant);
            let reply = assistant
                .respond(&history_from_args(messages))
                .await
                .context("assistant turn failed")?;
            print_json(&reply)
        }

        Commands::Drafts {
            text,
            session,
            date,
        } => {
            let text = read_input(text).await?;
            let day = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let parsed = parse_reply(&text);
            let drafts = parsed
                .structured
                .map(|output| drafts_from_output(&output, &session, day))
                .unwrap_or_default();
            print_json(&drafts)
        }

        Commands::Config => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}
