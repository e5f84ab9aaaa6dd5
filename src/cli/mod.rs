//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod conversation_list;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::api::ApiClient;
use crate::cli::conversation_list::{list_conversations, print_messages};
use crate::cli::say::run_say;
use crate::cli::settings::{SetContext, SettingRegistry};
use crate::core::config::{path_display, Config};
use crate::ui::chat_loop::{run_chat, ChatOptions};
use crate::utils::logging::{default_log_path, init_logging, LogTarget};

#[derive(Parser)]
#[command(name = "parlor")]
#[command(version = env!("VERGEN_GIT_DESCRIBE"))]
#[command(about = "A terminal chat client for a conversation-based chat backend")]
#[command(
    long_about = "Parlor is a full-screen terminal chat client. It lists your conversations \
in a sidebar, shows the selected thread, and sends messages to the backend's /api/chat \
endpoint.\n\n\
Backend URL (first match wins):\n\
  --base-url          Command-line flag\n\
  PARLOR_BASE_URL     Environment variable\n\
  base-url            Config file value ('parlor set base-url <url>')\n\
  default             http://127.0.0.1:8000\n\n\
Controls:\n\
  Enter               Send the message (or open the highlighted conversation)\n\
  Alt+Enter           Insert a newline\n\
  Tab                 Switch focus between sidebar and composer\n\
  Up/Down             Move through the conversation list\n\
  PageUp/PageDown     Scroll the thread (mouse wheel works too)\n\
  Ctrl+N              Start a new chat\n\
  Ctrl+B              Show or hide the sidebar\n\
  Ctrl+R              Refresh the conversation list\n\
  Ctrl+C              Quit the application\n\n\
Logging:\n\
  PARLOR_LOG          tracing filter directive, e.g. parlor=debug"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL, e.g. http://127.0.0.1:8000
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// List conversations known to the backend
    Conversations,
    /// Print the messages of a conversation
    Messages {
        /// Conversation id
        id: String,
    },
    /// Send one message and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        message: Vec<String>,
        /// Continue an existing conversation instead of starting a new one
        #[arg(short = 'c', long, value_name = "ID")]
        conversation: Option<String>,
    },
    /// Print the current configuration
    Config,
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    tokio::runtime::Runtime::new()?.block_on(async_main(args))
}

fn log_target(args: &Args, config: &Config, interactive: bool) -> Option<LogTarget> {
    if let Some(path) = &args.log {
        return Some(LogTarget::File(path.clone()));
    }
    if !interactive {
        return Some(LogTarget::Stderr);
    }
    config
        .log_path()
        .or_else(default_log_path)
        .map(LogTarget::File)
}

async fn async_main(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let command = args.command.as_ref().unwrap_or(&Commands::Chat);
    let interactive = matches!(command, Commands::Chat);

    if let Some(target) = log_target(&args, &config, interactive) {
        init_logging(&target, config.log_filter())?;
    }

    let base_url = config.resolve_base_url(args.base_url.as_deref());
    debug!(base_url = %base_url, "Resolved backend URL");

    match command {
        Commands::Chat => {
            run_chat(ChatOptions {
                base_url,
                show_sidebar: config.sidebar_visible(),
            })
            .await
        }
        Commands::Conversations => list_conversations(&ApiClient::new(&base_url)).await,
        Commands::Messages { id } => print_messages(&ApiClient::new(&base_url), id).await,
        Commands::Say {
            message,
            conversation,
        } => {
            let client = ApiClient::new(&base_url);
            let reply = run_say(&client, message.clone(), conversation.clone()).await?;
            println!("{reply}");
            Ok(())
        }
        Commands::Config => {
            if let Ok(path) = Config::config_path() {
                println!("Config file: {}", path_display(&path));
            }
            config.print_all();
            Ok(())
        }
        Commands::Set { key, value } => {
            let registry = SettingRegistry::new();
            let path = Config::config_path()?;
            let ctx = SetContext { config_path: &path };
            match registry.set(key, value, &ctx) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
        }
        Commands::Unset { key } => {
            let registry = SettingRegistry::new();
            let path = Config::config_path()?;
            let ctx = SetContext { config_path: &path };
            match registry.unset(key, &ctx) {
                Ok(message) => {
                    println!("{message}");
                    Ok(())
                }
                Err(err) => {
                    err.print();
                    std::process::exit(1);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn chat_is_the_default_command() {
        let args = parse(&["parlor"]);
        assert!(args.command.is_none());
        assert!(args.base_url.is_none());
    }

    #[test]
    fn say_joins_words_and_takes_conversation() {
        let args = parse(&["parlor", "say", "-c", "conv-42", "hello", "-there"]);
        match args.command {
            Some(Commands::Say {
                message,
                conversation,
            }) => {
                assert_eq!(message, vec!["hello", "-there"]);
                assert_eq!(conversation.as_deref(), Some("conv-42"));
            }
            _ => panic!("expected say"),
        }
    }

    #[test]
    fn say_requires_a_message() {
        assert!(Args::try_parse_from(["parlor", "say"]).is_err());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let args = parse(&["parlor", "conversations", "--base-url", "http://h:1", "--log", "x.log"]);
        assert_eq!(args.base_url.as_deref(), Some("http://h:1"));
        assert_eq!(args.log, Some(PathBuf::from("x.log")));
    }

    #[test]
    fn headless_commands_log_to_stderr_unless_told_otherwise() {
        let config = Config::default();
        let args = parse(&["parlor", "conversations"]);
        assert_eq!(log_target(&args, &config, false), Some(LogTarget::Stderr));

        let args = parse(&["parlor", "--log", "run.log"]);
        assert_eq!(
            log_target(&args, &config, true),
            Some(LogTarget::File(PathBuf::from("run.log")))
        );
    }

    #[test]
    fn chat_prefers_configured_log_file() {
        let config = Config {
            log_file: Some("/var/tmp/parlor.log".into()),
            ..Config::default()
        };
        let args = parse(&["parlor"]);
        assert_eq!(
            log_target(&args, &config, true),
            Some(LogTarget::File(PathBuf::from("/var/tmp/parlor.log")))
        );
    }
}
