//! Terminal rendering for the request lifecycle.
//!
//! The command layer drives a view twice per run: once in the pending state
//! before the network call, and once with the settled outcome. Failures that
//! happen before a request even starts (missing prompt, missing credentials)
//! go through [`render_error`], which picks a remedy hint by inspecting the
//! message text.

use crate::llm::{ChatResponse, CompletionResponse, LLMError};
use std::future::Future;

/// State of the one request a run performs.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome<T> {
    Pending,
    Failed(String),
    Succeeded(T),
}

impl<T> RequestOutcome<T> {
    /// Await the request and capture how it settled.
    pub async fn settle(request: impl Future<Output = Result<T, LLMError>>) -> Self {
        match request.await {
            Ok(value) => RequestOutcome::Succeeded(value),
            Err(error) => RequestOutcome::Failed(error.to_string()),
        }
    }

    pub fn failed(&self) -> bool {
        matches!(self, RequestOutcome::Failed(_))
    }
}

/// Render the chat view for the current request state.
pub fn render_chat_view(prompt: &str, provider: &str, state: &RequestOutcome<ChatResponse>) {
    match state {
        RequestOutcome::Pending => {
            render_request_header("Harmony AI CLI", provider, "You", prompt);
            println!("⏳ Thinking...");
        }
        RequestOutcome::Succeeded(response) => {
            println!();
            println!("AI ({}):", response.model);
            println!("{}", response.content);
        }
        RequestOutcome::Failed(message) => render_request_failure(message),
    }
}

/// Render the completion view for the current request state. Same contract
/// as [`render_chat_view`], different labels.
pub fn render_completion_view(
    prompt: &str,
    provider: &str,
    state: &RequestOutcome<CompletionResponse>,
) {
    match state {
        RequestOutcome::Pending => {
            render_request_header("Harmony AI CLI - Completion", provider, "Prompt", prompt);
            println!("⏳ Generating...");
        }
        RequestOutcome::Succeeded(response) => {
            println!();
            println!("Completion ({}):", response.model);
            println!("{}", response.text);
        }
        RequestOutcome::Failed(message) => render_request_failure(message),
    }
}

fn render_request_header(title: &str, provider: &str, prompt_label: &str, prompt: &str) {
    println!("{title} ({provider})");
    println!();
    println!("{prompt_label}:");
    println!("{prompt}");
    println!();
}

fn render_request_failure(message: &str) {
    eprintln!();
    eprintln!("Error:");
    eprintln!("{message}");
}

/// Remedy hint to show under a top-level error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RemedyHint {
    ApiKey,
    Usage,
    General,
}

/// Heuristic classification of an error message. The taxonomy is flat
/// strings by the time it reaches the display layer, so substrings decide.
fn classify_error(message: &str) -> RemedyHint {
    if message.contains("API key") {
        RemedyHint::ApiKey
    } else if message.contains("No prompt") {
        RemedyHint::Usage
    } else {
        RemedyHint::General
    }
}

/// Render a top-level failure with an actionable hint.
///
/// `command` names the subcommand that was running, for usage examples.
pub fn render_error(message: &str, command: Option<&str>) {
    eprintln!("❌ Error");
    eprintln!("{message}");
    eprintln!();

    match classify_error(message) {
        RemedyHint::ApiKey => {
            eprintln!("💡 Quick fix — set your API key as an environment variable:");
            eprintln!("    export OPENAI_API_KEY=\"your-key-here\"");
            eprintln!("  or");
            eprintln!("    export ANTHROPIC_API_KEY=\"your-key-here\"");
            eprintln!();
            eprintln!("Then run your command again.");
        }
        RemedyHint::Usage => {
            let command = command.unwrap_or("chat");
            eprintln!("💡 Usage:");
            eprintln!("    harmony {command} \"your prompt here\"");
            eprintln!("  or");
            eprintln!("    harmony {command} --prompt \"your prompt here\"");
        }
        RemedyHint::General => {
            eprintln!("💡 Need help? Run: harmony --help");
        }
    }
}
