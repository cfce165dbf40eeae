//! LLM: multi-provider text completion used to draft requirements documents.
//!
//! DESIGN
//! ======
//! Configured from environment variables. The `LlmClient` dispatches to
//! Anthropic or `OpenAI` based on `LLM_PROVIDER`. Callers depend on the
//! [`LlmChat`] trait so tests can substitute a canned client.

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod types;

use config::{LlmConfig, LlmProviderKind};
pub use types::{Completion, LlmChat, LlmError, Message};

// =============================================================================
// CLIENT DISPATCH
// =============================================================================

/// Concrete LLM client that dispatches to either Anthropic or OpenAI.
pub struct LlmClient {
    inner: LlmProvider,
    model: String,
    max_tokens: u32,
}

enum LlmProvider {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// Build an LLM client from environment variables. See [`LlmConfig::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        let config = LlmConfig::from_env()?;
        Self::from_config(config)
    }

    /// Build an LLM client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let inner = match config.provider {
            LlmProviderKind::Anthropic => {
                LlmProvider::Anthropic(anthropic::AnthropicClient::new(config.api_key, config.timeouts)?)
            }
            LlmProviderKind::OpenAi => LlmProvider::OpenAi(openai::OpenAiClient::new(
                config.api_key,
                config.openai_base_url,
                config.timeouts,
            )?),
        };
        Ok(Self { inner, model: config.model, max_tokens: config.max_tokens })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn complete(&self, system: &str, messages: &[Message]) -> Result<Completion, LlmError> {
        let completion = match &self.inner {
            LlmProvider::Anthropic(c) => c.chat(&self.model, self.max_tokens, system, messages).await?,
            LlmProvider::OpenAi(c) => c.chat(&self.model, self.max_tokens, system, messages).await?,
        };
        tracing::debug!(
            model = %completion.model,
            input_tokens = completion.input_tokens,
            output_tokens = completion.output_tokens,
            "llm: completion received"
        );
        Ok(completion)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
