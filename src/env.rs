//! Environment variable names and vendor API constants.
//!
//! This module centralizes the external configuration surface and the
//! per-vendor endpoint/model defaults so they live in one place.

/// Credential for the chatgpt provider.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Credential for the claude provider.
pub const ANTHROPIC_API_KEY_VAR: &str = "ANTHROPIC_API_KEY";

/// Optional provider preference: `chatgpt` or `claude`.
pub const AI_PROVIDER_VAR: &str = "AI_PROVIDER";

/// OpenAI endpoint and model defaults.
pub mod openai {
    /// Base URL for the OpenAI REST API.
    pub const API_BASE_URL: &str = "https://api.openai.com/v1";

    /// Default model for chat completion requests.
    pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

    /// Default model for legacy text completion requests.
    pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";

    /// `max_tokens` applied to completion requests when the caller gives none.
    pub const DEFAULT_COMPLETION_MAX_TOKENS: u32 = 100;
}

/// Anthropic endpoint and model defaults.
pub mod anthropic {
    /// Base URL for the Anthropic REST API.
    pub const API_BASE_URL: &str = "https://api.anthropic.com/v1";

    /// Value of the required `anthropic-version` header.
    pub const API_VERSION: &str = "2023-06-01";

    /// Default model for all requests.
    pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

    /// The messages API requires `max_tokens`; this applies when the caller gives none.
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
}
