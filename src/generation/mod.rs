//! Text generation for answers and summaries.

mod openai;

pub use openai::OpenAIGenerator;

use crate::error::Result;
use async_trait::async_trait;

/// Sampling parameters for a single completion.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token ceiling.
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}

/// Trait for remote text generation providers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Complete `prompt` and return the generated text.
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String>;
}
