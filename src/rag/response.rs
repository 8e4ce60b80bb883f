//! Answer and summary generation from retrieved context.

use super::context::{classify_intent, format_context_for_prompt, QueryIntent, SummaryStyle};
use crate::config::{GenerationSettings, Prompts};
use crate::error::Result;
use crate::generation::{GenerationParams, TextGenerator};
use crate::vector_store::SearchResult;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

/// Builds prompts from retrieved chunks and calls the generator.
#[derive(Clone)]
pub struct AnswerGenerator {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
    temperature: f32,
    answer_max_tokens: u32,
    summary_max_tokens: u32,
    context_char_limit: usize,
}

impl AnswerGenerator {
    /// Create a generator with default prompts and limits.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        let defaults = GenerationSettings::default();
        Self {
            generator,
            prompts: Prompts::default(),
            temperature: defaults.temperature,
            answer_max_tokens: defaults.answer_max_tokens,
            summary_max_tokens: defaults.summary_max_tokens,
            context_char_limit: 300,
        }
    }

    /// Apply generation settings.
    pub fn with_settings(mut self, settings: &GenerationSettings) -> Self {
        self.temperature = settings.temperature;
        self.answer_max_tokens = settings.answer_max_tokens;
        self.summary_max_tokens = settings.summary_max_tokens;
        self
    }

    /// Set custom prompts.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Set the per-chunk character ceiling in the context block.
    pub fn with_context_char_limit(mut self, limit: usize) -> Self {
        self.context_char_limit = limit;
        self
    }

    /// Build the prompt for a question.
    pub fn answer_prompt(&self, query: &str, results: &[SearchResult]) -> String {
        let context = format_context_for_prompt(results, self.context_char_limit);
        let template = match classify_intent(query) {
            QueryIntent::Question => &self.prompts.answer,
            QueryIntent::Summary => &self.prompts.answer_summary,
        };

        let mut vars = HashMap::new();
        vars.insert("context", context.as_str());
        vars.insert("question", query);
        Prompts::render(template, &vars)
    }

    /// Build the prompt for a summary.
    pub fn summary_prompt(&self, results: &[SearchResult], style: SummaryStyle) -> String {
        let context = format_context_for_prompt(results, self.context_char_limit);
        let template = match style {
            SummaryStyle::Brief => &self.prompts.summary_brief,
            SummaryStyle::Detailed => &self.prompts.summary_detailed,
            SummaryStyle::BulletPoints => &self.prompts.summary_bullet_points,
        };

        let mut vars = HashMap::new();
        vars.insert("context", context.as_str());
        Prompts::render(template, &vars)
    }

    /// Answer a question grounded in `results`.
    #[instrument(skip(self, results), fields(chunks = results.len()))]
    pub async fn answer(&self, query: &str, results: &[SearchResult]) -> Result<String> {
        info!("Generating answer using {} chunks", results.len());
        let prompt = self.answer_prompt(query, results);
        let params = GenerationParams::new(self.temperature, self.answer_max_tokens);
        self.generator.generate(&prompt, &params).await
    }

    /// Summarize `results` in the requested style.
    #[instrument(skip(self, results), fields(chunks = results.len()))]
    pub async fn summarize(&self, results: &[SearchResult], style: SummaryStyle) -> Result<String> {
        info!("Generating {} summary using {} chunks", style, results.len());
        let prompt = self.summary_prompt(results, style);
        let params = GenerationParams::new(self.temperature, self.summary_max_tokens);
        self.generator.generate(&prompt, &params).await
    }
}
