//! Provider and sampling configuration

use crate::config::CREDENTIAL_ENV;
use crate::error::RequestError;
use async_openai::types::{
    ChatCompletionRequestMessage, CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
};
use serde::{Deserialize, Serialize};

/// Configuration for an OpenAI-compatible provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Display name for the provider
    pub name: String,
    /// API base URL (e.g., "https://api.groq.com/openai/v1")
    pub base_url: String,
    /// Environment variable name for the API key
    pub api_key_env: String,
}

impl ProviderConfig {
    /// Groq's OpenAI-compatible endpoint
    pub fn groq() -> Self {
        Self {
            name: "Groq".to_string(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            api_key_env: CREDENTIAL_ENV.to_string(),
        }
    }

    /// Point at a different endpoint (proxies, local test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Fixed sampling parameters for one pipeline.
///
/// Streaming is always requested. Only the model id can be changed after
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl SamplingConfig {
    /// Text pipeline
    pub fn text() -> Self {
        Self {
            model: "deepseek-r1-distill-llama-70b".to_string(),
            temperature: 0.5,
            max_tokens: 4096,
            top_p: 0.95,
        }
    }

    /// Vision pipeline
    pub fn vision() -> Self {
        Self {
            model: "llama-3.2-90b-vision-preview".to_string(),
            temperature: 1.0,
            max_tokens: 2048,
            top_p: 1.0,
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    /// Build the streaming request body for `messages`.
    #[allow(deprecated)]
    pub fn to_request(
        &self,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<CreateChatCompletionRequest, RequestError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .top_p(self.top_p)
            .stream(true)
            .build()?;
        Ok(request)
    }
}
