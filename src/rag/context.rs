//! Context building for RAG prompts.

use crate::chunking::truncate_chars;
use crate::vector_store::SearchResult;
use serde::{Deserialize, Serialize};

/// Words that turn a question into a summary request.
const SUMMARY_KEYWORDS: [&str; 5] = ["summarize", "summary", "recap", "overview", "main points"];

/// What a free-form query is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIntent {
    /// A direct question.
    Question,
    /// A request to summarize the retrieved material.
    Summary,
}

/// Classify a query by keyword.
pub fn classify_intent(query: &str) -> QueryIntent {
    let lowered = query.to_lowercase();
    if SUMMARY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        QueryIntent::Summary
    } else {
        QueryIntent::Question
    }
}

/// Summary flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStyle {
    #[default]
    Brief,
    Detailed,
    BulletPoints,
}

impl std::str::FromStr for SummaryStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "brief" => Ok(SummaryStyle::Brief),
            "detailed" => Ok(SummaryStyle::Detailed),
            "bullet_points" | "bullets" => Ok(SummaryStyle::BulletPoints),
            _ => Err(format!("Unknown summary style: {}", s)),
        }
    }
}

impl std::fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryStyle::Brief => write!(f, "brief"),
            SummaryStyle::Detailed => write!(f, "detailed"),
            SummaryStyle::BulletPoints => write!(f, "bullet_points"),
        }
    }
}

/// Format retrieved chunks as a timestamped context block.
///
/// Chunks keep retrieval order (nearest first), each on its own line as
/// `[MM:SS] text`, with text cut to `char_limit` characters.
pub fn format_context_for_prompt(results: &[SearchResult], char_limit: usize) -> String {
    results
        .iter()
        .map(|r| {
            format!(
                "\n[{}] {}",
                r.chunk.format_timestamp(),
                truncate_chars(&r.chunk.text, char_limit)
            )
        })
        .collect()
}
