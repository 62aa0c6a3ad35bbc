//! # Harmony
//!
//! A terminal client for ChatGPT and Claude: one prompt in, one rendered
//! answer out. The tool itself is a thin adapter layer — two vendor APIs
//! normalized into one response shape, a credential-driven provider choice,
//! and a small display lifecycle around the single network call each run
//! performs.
//!
//! ## Architecture Overview
//!
//! - **[`llm`]**: Provider-agnostic capability interface with ChatGPT and
//!   Claude adapters, shared response types, and the adapter factory
//! - **[`config`]**: Environment snapshot and the provider selection decision
//! - **[`cli`]**: Argument parsing and prompt resolution
//! - **[`display`]**: Request lifecycle rendering (pending, result, error)
//! - **[`env`]**: Environment variable names and vendor API constants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harmony::config::ProviderSettings;
//! use harmony::llm::{ChatMessage, LLMProviderFactory};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let selection = ProviderSettings::from_env().select()?;
//!     let provider = LLMProviderFactory::create_provider(selection.kind, selection.api_key)?;
//!
//!     let response = provider
//!         .send_chat_request(vec![ChatMessage::user("What is the meaning of life?")], None)
//!         .await?;
//!
//!     println!("{} ({})", response.content, response.model);
//!     Ok(())
//! }
//! ```

/// Provider-agnostic LLM interface.
///
/// Capability trait, the two vendor adapters, normalized request/response
/// types, and the factory that instantiates an adapter from a kind and a
/// credential.
pub mod llm;

/// Provider selection from environment configuration.
pub mod config;

/// Command line argument parsing.
pub mod cli;

/// Terminal rendering for the request lifecycle.
pub mod display;

/// Environment variable names and vendor API constants.
pub mod env;

// Re-export the main provider abstraction types
pub use llm::{
    ChatGptProvider, ChatMessage, ChatResponse, ClaudeProvider, CompletionResponse, LLMError,
    LLMProvider, LLMProviderFactory, ProviderKind, RequestOptions, Role, TokenUsage,
};

// Re-export selection and display boundary types
pub use config::{ProviderSelection, ProviderSettings};
pub use display::RequestOutcome;
