//! Chat completions over an OpenAI-compatible API.

use super::{GenerationParams, TextGenerator};
use crate::error::{Result, TubeMindError};
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Remote chat model (defaults to `mistral-small-latest`).
pub struct OpenAIGenerator {
    client: async_openai::Client<OpenAIConfig>,
    model: String,
}

impl OpenAIGenerator {
    pub fn new(client: async_openai::Client<OpenAIConfig>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAIGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.to_string())
                .build()
                .map_err(|e| TubeMindError::RemoteGeneration(e.to_string()))?
                .into(),
        ];

        // Mistral's API takes `max_tokens`, not `max_completion_tokens`.
        #[allow(deprecated)]
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(params.temperature)
            .max_tokens(params.max_tokens)
            .build()
            .map_err(|e| TubeMindError::RemoteGeneration(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            TubeMindError::RemoteGeneration(format!("Failed to generate response: {}", e))
        })?;

        let text = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| TubeMindError::RemoteGeneration("Empty response from LLM".to_string()))?
            .clone();

        debug!("Generated {} characters", text.len());
        Ok(text)
    }
}
