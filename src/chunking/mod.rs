//! Transcript chunking.
//!
//! Caption segments are short and arrive in playback order; retrieval works
//! better on larger spans, so segments are packed greedily into chunks that
//! carry the time range they cover.

use crate::captions::CaptionSegment;
use serde::{Deserialize, Serialize};

/// A contiguous, time-bounded span of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Trimmed text content.
    pub text: String,
    /// Start of the first contributing segment, in seconds.
    pub start_time: f64,
    /// End of the last contributing segment, in seconds.
    pub end_time: f64,
}

impl Chunk {
    /// Create a new chunk.
    pub fn new(text: impl Into<String>, start_time: f64, end_time: f64) -> Self {
        Self {
            text: text.into(),
            start_time,
            end_time,
        }
    }

    /// Format the chunk start for display.
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.start_time)
    }
}

/// Pack caption segments into chunks of roughly `target_size` characters.
///
/// Each segment's text is appended to a buffer followed by a space. The buffer
/// is flushed once its length reaches `target_size`, and always after the last
/// segment. Segments are never split, so a chunk can exceed the target.
pub fn chunk_segments(segments: &[CaptionSegment], target_size: usize) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0usize;
    let mut start_time = 0.0;
    let mut end_time = 0.0;

    for (i, segment) in segments.iter().enumerate() {
        if buffer.is_empty() {
            start_time = segment.start;
        }

        buffer.push_str(&segment.text);
        buffer.push(' ');
        buffer_chars += segment.text.chars().count() + 1;
        end_time = segment.end();

        let is_last = i + 1 == segments.len();
        if buffer_chars >= target_size || is_last {
            let text = buffer.trim();
            // Only reachable when every absorbed segment was blank.
            if !text.is_empty() {
                chunks.push(Chunk::new(text, start_time, end_time.max(start_time)));
            }
            buffer.clear();
            buffer_chars = 0;
        }
    }

    chunks
}

/// Format seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so 3700 seconds is `61:40`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Truncate text to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
