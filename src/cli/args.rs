//! Command line argument parsing
//!
//! Two subcommands, one job each:
//! - `chat`: send the prompt as a single-turn chat request
//! - `complete`: send the prompt as a legacy text completion request
//!
//! Both accept the prompt positionally or via `-p/--prompt`; the flag wins
//! when both are given.

use clap::{Parser, Subcommand};
use thiserror::Error;

const ENV_HELP: &str = "Environment variables:
  OPENAI_API_KEY      Your OpenAI API key
  ANTHROPIC_API_KEY   Your Anthropic (Claude) API key
  AI_PROVIDER         Preferred provider: 'chatgpt' or 'claude' (optional)
                      If not set, uses the first available API key

Examples:
  harmony chat \"What is the meaning of life?\"
  harmony complete \"Once upon a time\"
  AI_PROVIDER=claude harmony chat \"Hello Claude!\"";

#[derive(Debug, Parser)]
#[command(name = "harmony")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI CLI tool for interacting with ChatGPT and Claude")]
#[command(long_about = None)]
#[command(after_help = ENV_HELP)]
#[command(arg_required_else_help = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a chat completion request
    Chat {
        /// Prompt text
        prompt: Option<String>,
        /// Provide prompt as an option instead of positional arg
        #[arg(short = 'p', long = "prompt", value_name = "TEXT")]
        prompt_flag: Option<String>,
    },
    /// Send a text completion request
    Complete {
        /// Prompt text
        prompt: Option<String>,
        /// Provide prompt as an option instead of positional arg
        #[arg(short = 'p', long = "prompt", value_name = "TEXT")]
        prompt_flag: Option<String>,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("No prompt provided. Usage: harmony {command} \"your prompt here\"")]
    NoPrompt { command: &'static str },
}

impl Commands {
    /// Name of the subcommand as the user typed it.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Chat { .. } => "chat",
            Commands::Complete { .. } => "complete",
        }
    }

    /// Resolve the effective prompt; the `--prompt` flag wins over the
    /// positional argument. Absent or empty prompts are an error.
    pub fn prompt(&self) -> Result<String, ArgsError> {
        let (Commands::Chat {
            prompt,
            prompt_flag,
        }
        | Commands::Complete {
            prompt,
            prompt_flag,
        }) = self;

        prompt_flag
            .clone()
            .or_else(|| prompt.clone())
            .filter(|prompt| !prompt.is_empty())
            .ok_or(ArgsError::NoPrompt {
                command: self.name(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_positional_prompt() {
        let args = Args::try_parse_from(["harmony", "chat", "hello there"]).unwrap();
        assert_eq!(args.command.name(), "chat");
        assert_eq!(args.command.prompt().unwrap(), "hello there");
    }

    #[test]
    fn test_prompt_flag() {
        let args =
            Args::try_parse_from(["harmony", "complete", "--prompt", "once upon a time"]).unwrap();
        assert_eq!(args.command.name(), "complete");
        assert_eq!(args.command.prompt().unwrap(), "once upon a time");
    }

    #[test]
    fn test_flag_wins_over_positional() {
        let args =
            Args::try_parse_from(["harmony", "chat", "positional", "--prompt", "from flag"])
                .unwrap();
        assert_eq!(args.command.prompt().unwrap(), "from flag");
    }

    #[test]
    fn test_missing_prompt_names_the_command() {
        let args = Args::try_parse_from(["harmony", "chat"]).unwrap();
        let error = args.command.prompt().unwrap_err();
        assert_eq!(error, ArgsError::NoPrompt { command: "chat" });

        let message = error.to_string();
        assert!(message.contains("No prompt"));
        assert!(message.contains("harmony chat"));
    }

    #[test]
    fn test_empty_prompt_is_rejected() {
        let command = Commands::Complete {
            prompt: Some(String::new()),
            prompt_flag: None,
        };
        assert_eq!(
            command.prompt().unwrap_err(),
            ArgsError::NoPrompt {
                command: "complete"
            }
        );
    }

    #[test]
    fn test_unknown_subcommand_is_a_parse_error() {
        assert!(Args::try_parse_from(["harmony", "summarize", "text"]).is_err());
    }
}
