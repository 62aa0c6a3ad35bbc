use crate::llm::types::{ChatMessage, ChatResponse, CompletionResponse, LLMError, RequestOptions};
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Capability interface implemented by each vendor adapter.
///
/// The rest of the tool is provider-agnostic: it talks to one of these,
/// resolved once at startup, and consumes the normalized response types.
pub trait LLMProvider: Send + Sync {
    /// Send an ordered message sequence as a chat request.
    ///
    /// `messages` must be non-empty. `options` overrides the adapter
    /// defaults where present and is forwarded otherwise untouched.
    fn send_chat_request(
        &self,
        messages: Vec<ChatMessage>,
        options: Option<RequestOptions>,
    ) -> BoxFuture<'_, Result<ChatResponse, LLMError>>;

    /// Send a prompt as a legacy text completion request.
    ///
    /// Not every vendor has a native completion endpoint; adapters without
    /// one satisfy this by delegating to [`Self::send_chat_request`].
    fn send_completion_request(
        &self,
        prompt: String,
        options: Option<RequestOptions>,
    ) -> BoxFuture<'_, Result<CompletionResponse, LLMError>>;

    /// Short label used in display output and logs.
    fn provider_name(&self) -> &'static str;
}

/// The closed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    ChatGpt,
    Claude,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::ChatGpt => "chatgpt",
            ProviderKind::Claude => "claude",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = LLMError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "chatgpt" => Ok(ProviderKind::ChatGpt),
            "claude" => Ok(ProviderKind::Claude),
            other => Err(LLMError::UnknownProvider(other.to_string())),
        }
    }
}

/// Factory for instantiating provider adapters.
pub struct LLMProviderFactory;

impl LLMProviderFactory {
    /// Build the adapter for `kind`, holding the given credential.
    pub fn create_provider(
        kind: ProviderKind,
        api_key: String,
    ) -> Result<Arc<dyn LLMProvider>, LLMError> {
        match kind {
            ProviderKind::ChatGpt => Ok(Arc::new(
                crate::llm::chatgpt::ChatGptProvider::new(api_key)?,
            )),
            ProviderKind::Claude => {
                Ok(Arc::new(crate::llm::claude::ClaudeProvider::new(api_key)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_canonical_names() {
        assert_eq!("chatgpt".parse::<ProviderKind>().unwrap(), ProviderKind::ChatGpt);
        assert_eq!("claude".parse::<ProviderKind>().unwrap(), ProviderKind::Claude);
    }

    #[test]
    fn test_unrecognized_kind_is_rejected() {
        let error = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(error, LLMError::UnknownProvider(kind) if kind == "mistral"));

        // Case matters: the canonical names are lowercase.
        assert!("ChatGPT".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_kind_display_round_trips() {
        for kind in [ProviderKind::ChatGpt, ProviderKind::Claude] {
            assert_eq!(kind.to_string().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_factory_builds_both_adapters() {
        let chatgpt =
            LLMProviderFactory::create_provider(ProviderKind::ChatGpt, "sk-test".to_string())
                .unwrap();
        assert_eq!(chatgpt.provider_name(), "chatgpt");

        let claude =
            LLMProviderFactory::create_provider(ProviderKind::Claude, "sk-ant-test".to_string())
                .unwrap();
        assert_eq!(claude.provider_name(), "claude");
    }
}
