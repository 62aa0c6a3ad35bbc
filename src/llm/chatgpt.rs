//! OpenAI-backed provider adapter.
//!
//! Chat requests go to the chat completions endpoint; completion requests go
//! to the legacy completions endpoint, which is a separate API with its own
//! default model. Assistant content in a chat response is not always a plain
//! string: newer payloads deliver an array of heterogeneous fragments, only
//! some of which carry text. [`extract_chat_content`] flattens every shape
//! this adapter can receive.

use crate::env::openai;
use crate::llm::provider::LLMProvider;
use crate::llm::types::{
    ChatMessage, ChatResponse, CompletionResponse, LLMError, RequestOptions, Role, TokenUsage,
};
use futures::future::BoxFuture;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROVIDER_NAME: &str = "chatgpt";

/// Adapter for the OpenAI API.
pub struct ChatGptProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_chat_model: String,
    default_completion_model: String,
}

impl ChatGptProvider {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            base_url: openai::API_BASE_URL.to_string(),
            default_chat_model: openai::DEFAULT_CHAT_MODEL.to_string(),
            default_completion_model: openai::DEFAULT_COMPLETION_MODEL.to_string(),
        })
    }
}

impl LLMProvider for ChatGptProvider {
    fn send_chat_request(
        &self,
        messages: Vec<ChatMessage>,
        options: Option<RequestOptions>,
    ) -> BoxFuture<'_, Result<ChatResponse, LLMError>> {
        Box::pin(async move {
            if messages.is_empty() {
                return Err(LLMError::InvalidRequest(
                    "chat request requires at least one message".to_string(),
                ));
            }

            let options = options.unwrap_or_default();
            let model = options
                .model
                .clone()
                .unwrap_or_else(|| self.default_chat_model.clone());
            let body = ChatApiRequest {
                model: &model,
                messages: messages
                    .iter()
                    .map(|message| WireMessage {
                        role: message.role,
                        content: &message.content,
                    })
                    .collect(),
                max_tokens: options.max_tokens,
                temperature: options.temperature,
                top_p: options.top_p,
            };

            debug!(model = %model, messages = messages.len(), "sending chat completion request");
            let response = self
                .client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(self.api_key.trim())
                .json(&body)
                .send()
                .await?;
            let parsed: ChatApiResponse = read_api_response(response).await?;

            let content = extract_chat_content(
                parsed
                    .choices
                    .into_iter()
                    .next()
                    .and_then(|choice| choice.message)
                    .and_then(|message| message.content),
            );

            Ok(ChatResponse {
                content,
                model: parsed.model.unwrap_or(model),
                usage: Some(parsed.usage.unwrap_or_default().into()),
            })
        })
    }

    fn send_completion_request(
        &self,
        prompt: String,
        options: Option<RequestOptions>,
    ) -> BoxFuture<'_, Result<CompletionResponse, LLMError>> {
        Box::pin(async move {
            let options = options.unwrap_or_default();
            let model = options
                .model
                .clone()
                .unwrap_or_else(|| self.default_completion_model.clone());
            let body = CompletionApiRequest {
                model: &model,
                prompt: &prompt,
                max_tokens: options
                    .max_tokens
                    .unwrap_or(openai::DEFAULT_COMPLETION_MAX_TOKENS),
                temperature: options.temperature,
                top_p: options.top_p,
            };

            debug!(model = %model, "sending legacy completion request");
            let response = self
                .client
                .post(format!("{}/completions", self.base_url))
                .bearer_auth(self.api_key.trim())
                .json(&body)
                .send()
                .await?;
            let parsed: CompletionApiResponse = read_api_response(response).await?;

            let text = parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.text)
                .unwrap_or_default();

            Ok(CompletionResponse {
                text,
                model: parsed.model.unwrap_or(model),
                usage: Some(parsed.usage.unwrap_or_default().into()),
            })
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// Deserialize a successful response body, or surface the vendor failure
/// unchanged as status plus body text.
async fn read_api_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LLMError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<body unavailable>".to_string());
        return Err(LLMError::Api {
            provider: PROVIDER_NAME,
            status,
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[derive(Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatApiResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatApiChoice {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<ChatContent>,
}

/// Assistant content as the vendor may deliver it: a plain string, an array
/// of fragments, or some shape this adapter does not recognize.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Fragments(Vec<ContentFragment>),
    Other(serde_json::Value),
}

/// One piece of a multi-part content payload. Objects without a string
/// `text` field fall through to `Other` and contribute nothing.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ContentFragment {
    Text { text: String },
    Plain(String),
    Other(serde_json::Value),
}

/// Flatten vendor chat content into plain text.
///
/// A plain string passes through untouched. A fragment array concatenates
/// every extractable text payload in order, skips non-text fragments, and
/// trims the joined result. Absent or unrecognized content is empty.
fn extract_chat_content(content: Option<ChatContent>) -> String {
    match content {
        Some(ChatContent::Text(text)) => text,
        Some(ChatContent::Fragments(fragments)) => fragments
            .into_iter()
            .map(|fragment| match fragment {
                ContentFragment::Text { text } => text,
                ContentFragment::Plain(text) => text,
                ContentFragment::Other(_) => String::new(),
            })
            .collect::<String>()
            .trim()
            .to_string(),
        Some(ChatContent::Other(_)) | None => String::new(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ApiUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

impl From<ApiUsage> for TokenUsage {
    fn from(usage: ApiUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
        }
    }
}

#[derive(Serialize)]
struct CompletionApiRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct CompletionApiResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<CompletionApiChoice>,
    #[serde(default)]
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionApiChoice {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> Option<ChatContent> {
        serde_json::from_value(value).expect("content shape should always deserialize")
    }

    #[test]
    fn test_extract_plain_string_passes_through() {
        assert_eq!(extract_chat_content(content(json!("hello"))), "hello");
        // Plain strings are not trimmed; only fragment arrays are.
        assert_eq!(extract_chat_content(content(json!("  hi  "))), "  hi  ");
    }

    #[test]
    fn test_extract_mixed_fragments_in_order() {
        let value = json!([{"text": "a"}, {"other": 1}, "b"]);
        assert_eq!(extract_chat_content(content(value)), "ab");

        let value = json!([{"text": "Hi "}, {}, "there"]);
        assert_eq!(extract_chat_content(content(value)), "Hi there");
    }

    #[test]
    fn test_extract_trims_joined_fragments() {
        let value = json!([{"text": "  padded  "}]);
        assert_eq!(extract_chat_content(content(value)), "padded");
    }

    #[test]
    fn test_extract_skips_non_string_text_fields() {
        let value = json!([{"text": 7}, {"text": "kept"}]);
        assert_eq!(extract_chat_content(content(value)), "kept");
    }

    #[test]
    fn test_extract_unsupported_shapes_are_empty() {
        assert_eq!(extract_chat_content(None), "");
        assert_eq!(extract_chat_content(content(json!(null))), "");
        assert_eq!(extract_chat_content(content(json!(42))), "");
        assert_eq!(extract_chat_content(content(json!({"object": "thing"}))), "");
    }

    #[test]
    fn test_chat_response_deserializes_string_content() {
        let raw = json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "model": "gpt-4o-mini-2024-07-18",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello there"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 3, "total_tokens": 13}
        });
        let parsed: ChatApiResponse = serde_json::from_value(raw).unwrap();

        assert_eq!(parsed.model.as_deref(), Some("gpt-4o-mini-2024-07-18"));
        let extracted = extract_chat_content(
            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
        );
        assert_eq!(extracted, "Hello there");

        let usage: TokenUsage = parsed.usage.unwrap().into();
        assert_eq!(usage, TokenUsage::from_counts(10, 3));
    }

    #[test]
    fn test_chat_response_tolerates_null_content_and_missing_usage() {
        let raw = json!({
            "model": "gpt-4o-mini",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": null}}]
        });
        let parsed: ChatApiResponse = serde_json::from_value(raw).unwrap();

        let extracted = extract_chat_content(
            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message)
                .and_then(|message| message.content),
        );
        assert_eq!(extracted, "");

        // Usage fields default to zero when the vendor omits them.
        let usage: TokenUsage = parsed.usage.unwrap_or_default().into();
        assert_eq!(usage, TokenUsage::default());
    }

    #[test]
    fn test_completion_response_takes_first_choice() {
        let raw = json!({
            "model": "gpt-3.5-turbo-instruct",
            "choices": [
                {"text": " in a land far away", "index": 0, "finish_reason": "length"},
                {"text": "second candidate", "index": 1, "finish_reason": "length"}
            ],
            "usage": {"prompt_tokens": 4, "completion_tokens": 6, "total_tokens": 10}
        });
        let parsed: CompletionApiResponse = serde_json::from_value(raw).unwrap();

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.text)
            .unwrap_or_default();
        assert_eq!(text, " in a land far away");
    }

    #[test]
    fn test_chat_request_serializes_roles_and_skips_absent_options() {
        let body = ChatApiRequest {
            model: "gpt-4o-mini",
            messages: vec![WireMessage {
                role: Role::User,
                content: "hi",
            }],
            max_tokens: None,
            temperature: Some(0.5),
            top_p: None,
        };
        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
        assert_eq!(value["temperature"], 0.5);
        assert!(value.get("max_tokens").is_none());
        assert!(value.get("top_p").is_none());
    }
}
