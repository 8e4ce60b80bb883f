//! RAG (Retrieval-Augmented Generation) over an ingested video.
//!
//! Retrieval ranks a video's chunks against a query; the answer generator
//! turns the top chunks into a timestamped context block for the model.

pub mod context;
mod response;
mod retriever;

pub use context::{classify_intent, QueryIntent, SummaryStyle};
pub use response::AnswerGenerator;
pub use retriever::Retriever;

use crate::chunking::truncate_chars;
use crate::vector_store::SearchResult;
use serde::{Deserialize, Serialize};

/// Characters of chunk text shown in a source citation.
pub const SOURCE_EXCERPT_CHARS: usize = 200;

/// Characters of chunk text shown in a key point.
pub const KEY_POINT_EXCERPT_CHARS: usize = 150;

/// Maximum number of key points in a summary.
pub const MAX_KEY_POINTS: usize = 5;

/// A cited transcript excerpt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Truncated chunk text.
    pub text: String,
    /// Formatted start time (`MM:SS`).
    pub timestamp: String,
    /// Start time in seconds.
    pub start_time: f64,
}

impl From<&SearchResult> for SourceRef {
    fn from(result: &SearchResult) -> Self {
        Self {
            text: truncate_chars(&result.chunk.text, SOURCE_EXCERPT_CHARS),
            timestamp: result.chunk.format_timestamp(),
            start_time: result.chunk.start_time,
        }
    }
}

/// A highlighted moment in a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyPoint {
    /// Truncated chunk text.
    pub point: String,
    /// Formatted start time (`MM:SS`).
    pub timestamp: String,
    /// Start time in seconds.
    pub start_time: f64,
}

impl From<&SearchResult> for KeyPoint {
    fn from(result: &SearchResult) -> Self {
        Self {
            point: truncate_chars(&result.chunk.text, KEY_POINT_EXCERPT_CHARS),
            timestamp: result.chunk.format_timestamp(),
            start_time: result.chunk.start_time,
        }
    }
}

/// Answer to a question, with the chunks it was grounded on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Summary of a video, with key points and sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub key_points: Vec<KeyPoint>,
    pub sources: Vec<SourceRef>,
}
