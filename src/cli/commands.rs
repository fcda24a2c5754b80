use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `thoughtdesk` - turn brain dumps and assistant replies into action records.
#[derive(Parser, Debug)]
#[command(name = "thoughtdesk")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Turn brain dumps and assistant replies into action records.", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.thoughtdesk/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level (raw model output, reasoning, dropped elements)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract action items from a brain dump
    Extract {
        /// Text to extract from; `-` or omitted reads stdin
        text: Option<String>,
    },

    /// Split an assistant reply into spoken text and structured payload (no model call)
    ParseReply {
        /// Reply text; `-` or omitted reads stdin
        text: Option<String>,
    },

    /// Run one assistant turn over a conversation
    Chat {
        /// Conversation turns, oldest first, alternating user and assistant
        #[arg(required = true)]
        messages: Vec<String>,
    },

    /// Build store-ready record drafts from an assistant reply (no model call)
    Drafts {
        /// Reply text; `-` or omitted reads stdin
        text: Option<String>,

        /// Session identifier stamped on action drafts
        #[arg(long, default_value = "voice")]
        session: String,

        /// Day agenda times resolve on (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },

    /// Show the resolved configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn chat_collects_all_turns() {
        let cli = Cli::try_parse_from(["thoughtdesk", "chat", "hi", "hello", "book it"]).unwrap();
        match cli.command {
            Commands::Chat { messages } => assert_eq!(messages.len(), 3),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn drafts_parses_date_and_global_flags() {
        let cli = Cli::try_parse_from([
            "thoughtdesk",
            "drafts",
            "-",
            "--date",
            "2026-03-14",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Drafts {
                text,
                session,
                date,
            } => {
                assert_eq!(text.as_deref(), Some("-"));
                assert_eq!(session, "voice");
                assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2026, 3, 14));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn chat_requires_a_message() {
        assert!(Cli::try_parse_from(["thoughtdesk", "chat"]).is_err());
    }
}
