pub mod chatgpt;
pub mod claude;
pub mod provider;
pub mod types;

pub use chatgpt::ChatGptProvider;
pub use claude::ClaudeProvider;
pub use provider::{LLMProvider, LLMProviderFactory, ProviderKind};
pub use types::*;
