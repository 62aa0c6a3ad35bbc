use serde::{Deserialize, Serialize};

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn in a conversation.
///
/// Requests carry an ordered sequence of these; the CLI itself only ever
/// sends a single user turn per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Optional per-request overrides. An absent field means "use the adapter
/// default". Values are forwarded to the vendor untouched; out-of-range
/// values are rejected remotely, not locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestOptions {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

/// Token accounting reported alongside generated text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl TokenUsage {
    /// Build usage from prompt/completion counts, keeping the invariant
    /// `total_tokens == prompt_tokens + completion_tokens`.
    pub fn from_counts(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Result of a chat request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub content: String,
    /// Model identifier the vendor actually used.
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// Result of a legacy text completion request.
///
/// Structurally parallel to [`ChatResponse`] but carries `text` instead of
/// `content`: completion and chat are historically distinct vendor endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// Errors surfaced by the provider adapters and the selector.
#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("No API key found. Set OPENAI_API_KEY or ANTHROPIC_API_KEY environment variable.")]
    NoCredentials,
    #[error("Unknown provider type: {0}")]
    UnknownProvider(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn test_message_constructors() {
        let message = ChatMessage::user("hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "hello");

        assert_eq!(ChatMessage::system("s").role, Role::System);
        assert_eq!(ChatMessage::assistant("a").role, Role::Assistant);
    }

    #[test]
    fn test_usage_total_invariant() {
        let usage = TokenUsage::from_counts(17, 25);
        assert_eq!(usage.prompt_tokens, 17);
        assert_eq!(usage.completion_tokens, 25);
        assert_eq!(usage.total_tokens, 42);
    }

    #[test]
    fn test_no_credentials_message_names_the_remedy() {
        let message = LLMError::NoCredentials.to_string();
        assert!(message.contains("API key"));
        assert!(message.contains("OPENAI_API_KEY"));
        assert!(message.contains("ANTHROPIC_API_KEY"));
    }
}
