//! Caption source abstraction for TubeMind.
//!
//! A caption source turns a video identifier into timed caption segments.

mod youtube;

pub use youtube::{parse_json3, YoutubeCaptions};

use crate::error::{Result, TubeMindError};
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A single timed caption line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    /// Caption text.
    pub text: String,
    /// Start time in seconds.
    pub start: f64,
    /// Duration in seconds (0 when unknown).
    pub duration: f64,
}

impl CaptionSegment {
    /// Create a new caption segment.
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    /// End time in seconds.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Trait for caption providers.
#[async_trait]
pub trait CaptionSource: Send + Sync {
    /// Fetch ordered caption segments for a video.
    ///
    /// Fails with `NoCaptionsAvailable` when the video has no usable transcript.
    async fn fetch(&self, video_id: &str) -> Result<Vec<CaptionSegment>>;
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?:
                # Full YouTube URLs
                (?:https?://)?
                (?:www\.|m\.)?
                (?:youtube\.com/watch\?(?:.*&)?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([0-9A-Za-z_-]{11})
            )
            |
            # Bare video ID (11 characters)
            ^([0-9A-Za-z_-]{11})$
        ",
        )
        .expect("video id pattern is valid")
    })
}

/// Extract the 11-character video ID from a YouTube URL or bare ID.
pub fn extract_video_id(input: &str) -> Result<String> {
    let trimmed = input.trim();
    video_id_regex()
        .captures(trimmed)
        .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            TubeMindError::InvalidIdentifier(format!(
                "Could not extract a YouTube video ID from '{}'",
                input
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let cases = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtube.com/embed/dQw4w9WgXcQ",
            "https://m.youtube.com/shorts/dQw4w9WgXcQ",
            "  dQw4w9WgXcQ  ",
        ];
        for input in cases {
            assert_eq!(extract_video_id(input).unwrap(), "dQw4w9WgXcQ", "{}", input);
        }
    }

    #[test]
    fn test_extract_video_id_rejects_garbage() {
        for input in ["", "not-a-video-id", "https://example.com/video", "short"] {
            assert!(matches!(
                extract_video_id(input),
                Err(TubeMindError::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn test_segment_end() {
        let seg = CaptionSegment::new("hi", 3.0, 4.5);
        assert!((seg.end() - 7.5).abs() < f64::EPSILON);
    }
}
