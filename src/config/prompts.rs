//! Prompt templates for TubeMind.
//!
//! Templates use `{{name}}` placeholders and can be overridden in the
//! `[prompts]` section of the configuration file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Prompts {
    /// Direct question over the context block.
    pub answer: String,
    /// Question that reads as a request for a summary.
    pub answer_summary: String,
    pub summary_brief: String,
    pub summary_detailed: String,
    pub summary_bullet_points: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            answer: "Answer: {{context}}\n\nQ: {{question}}".to_string(),
            answer_summary: "Summarize: {{context}}\n\n{{question}}".to_string(),
            summary_brief: "Brief summary: {{context}}".to_string(),
            summary_detailed: "Detailed summary: {{context}}".to_string(),
            summary_bullet_points: "Bullet summary: {{context}}".to_string(),
        }
    }
}

impl Prompts {
    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<&str, &str>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
