//! Provider selection from environment configuration.
//!
//! The three external signals — two credentials and an optional preference —
//! are read once at process start into an explicit [`ProviderSettings`]
//! value. Selection itself is a pure decision over that snapshot, so there is
//! no ambient global state and the decision table is directly testable.

use crate::env;
use crate::llm::{LLMError, ProviderKind};

/// Snapshot of the credential and preference environment variables.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub preference: Option<String>,
}

/// A resolved choice: which adapter to build, and with which credential.
#[derive(Debug, Clone)]
pub struct ProviderSelection {
    pub kind: ProviderKind,
    pub api_key: String,
}

impl ProviderSettings {
    /// Read the settings from the process environment. Empty values count
    /// as unset.
    pub fn from_env() -> Self {
        Self {
            openai_api_key: read_var(env::OPENAI_API_KEY_VAR),
            anthropic_api_key: read_var(env::ANTHROPIC_API_KEY_VAR),
            preference: read_var(env::AI_PROVIDER_VAR),
        }
    }

    /// Pick the provider to use.
    ///
    /// An explicit preference wins when its key is configured; otherwise the
    /// first available key decides, OpenAI before Anthropic. A preference
    /// that is unrecognized, or whose key is missing, falls through to key
    /// order instead of failing.
    pub fn select(&self) -> Result<ProviderSelection, LLMError> {
        let preference = self
            .preference
            .as_deref()
            .and_then(|value| value.parse::<ProviderKind>().ok());

        if preference == Some(ProviderKind::ChatGpt) {
            if let Some(key) = &self.openai_api_key {
                return Ok(ProviderSelection {
                    kind: ProviderKind::ChatGpt,
                    api_key: key.clone(),
                });
            }
        }
        if preference == Some(ProviderKind::Claude) {
            if let Some(key) = &self.anthropic_api_key {
                return Ok(ProviderSelection {
                    kind: ProviderKind::Claude,
                    api_key: key.clone(),
                });
            }
        }

        if let Some(key) = &self.openai_api_key {
            return Ok(ProviderSelection {
                kind: ProviderKind::ChatGpt,
                api_key: key.clone(),
            });
        }
        if let Some(key) = &self.anthropic_api_key {
            return Ok(ProviderSelection {
                kind: ProviderKind::Claude,
                api_key: key.clone(),
            });
        }

        Err(LLMError::NoCredentials)
    }
}

fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
