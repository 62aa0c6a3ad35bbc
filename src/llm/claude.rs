//! Anthropic-backed provider adapter.
//!
//! Everything goes through the messages API. The service has no system role
//! at the message-array level, so system turns are demoted to user turns
//! before sending, and it has no legacy completion endpoint at all, so
//! completion requests are satisfied by wrapping the prompt as a single user
//! chat turn and repackaging the chat result.

use crate::env::anthropic;
use crate::llm::provider::LLMProvider;
use crate::llm::types::{
    ChatMessage, ChatResponse, CompletionResponse, LLMError, RequestOptions, Role, TokenUsage,
};
use futures::future::BoxFuture;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::debug;

const PROVIDER_NAME: &str = "claude";

/// Adapter for the Anthropic API.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl ClaudeProvider {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            api_key,
            base_url: anthropic::API_BASE_URL.to_string(),
            default_model: anthropic::DEFAULT_MODEL.to_string(),
        })
    }

    fn headers(&self) -> Result<HeaderMap, LLMError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(self.api_key.trim()).map_err(|_| {
                LLMError::InvalidRequest(
                    "Anthropic API key contains characters not valid in a header".to_string(),
                )
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(anthropic::API_VERSION),
        );
        Ok(headers)
    }
}

impl LLMProvider for ClaudeProvider {
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
                .unwrap_or_else(|| self.default_model.clone());
            let body = MessagesApiRequest {
                model: &model,
                max_tokens: options.max_tokens.unwrap_or(anthropic::DEFAULT_MAX_TOKENS),
                messages: messages
                    .iter()
                    .map(|message| WireMessage {
                        role: wire_role(message.role),
                        content: &message.content,
                    })
                    .collect(),
                temperature: options.temperature,
                top_p: options.top_p,
            };

            debug!(model = %model, messages = messages.len(), "sending messages request");
            let response = self
                .client
                .post(format!("{}/messages", self.base_url))
                .headers(self.headers()?)
                .json(&body)
                .send()
                .await?;
            let parsed: MessagesApiResponse = read_api_response(response).await?;

            Ok(chat_response_from(parsed))
        })
    }

    fn send_completion_request(
        &self,
        prompt: String,
        options: Option<RequestOptions>,
    ) -> BoxFuture<'_, Result<CompletionResponse, LLMError>> {
        Box::pin(async move {
            let response = self
                .send_chat_request(vec![ChatMessage::user(prompt)], options)
                .await?;
            Ok(completion_from_chat(response))
        })
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

/// The messages API has no system role at the message-array level; system
/// turns are demoted to user turns. Lossy and intentional.
fn wire_role(role: Role) -> &'static str {
    match role {
        Role::System | Role::User => "user",
        Role::Assistant => "assistant",
    }
}

/// Normalize a messages API result: text blocks joined in order, usage
/// totalled from the vendor's input/output counts.
fn chat_response_from(parsed: MessagesApiResponse) -> ChatResponse {
    let content = parsed
        .content
        .into_iter()
        .filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text),
            ContentBlock::Other => None,
        })
        .collect::<String>();

    ChatResponse {
        content,
        model: parsed.model,
        usage: Some(TokenUsage::from_counts(
            parsed.usage.input_tokens,
            parsed.usage.output_tokens,
        )),
    }
}

/// Repackage a chat result as a completion result: `content` becomes `text`,
/// `model` and `usage` carry over unchanged.
fn completion_from_chat(response: ChatResponse) -> CompletionResponse {
    CompletionResponse {
        text: response.content,
        model: response.model,
        usage: response.usage,
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
struct MessagesApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesApiResponse {
    model: String,
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: MessagesUsage,
}

/// One block of a messages API response. Non-text blocks (tool use,
/// thinking, and whatever gets added next) are skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct MessagesUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}
