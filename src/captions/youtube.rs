//! YouTube caption source backed by yt-dlp.

use super::{CaptionSegment, CaptionSource};
use crate::config::CaptionSettings;
use crate::error::{Result, TubeMindError};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

/// Fetches manual subtitles or automatic captions for YouTube videos.
pub struct YoutubeCaptions {
    http: reqwest::Client,
    languages: Vec<String>,
    cookies_file: Option<PathBuf>,
}

impl YoutubeCaptions {
    pub fn new(settings: &CaptionSettings, cookies_file: Option<PathBuf>) -> Self {
        Self {
            http: reqwest::Client::new(),
            languages: settings.languages.clone(),
            cookies_file,
        }
    }

    /// Fetch video info using yt-dlp.
    async fn fetch_info_ytdlp(&self, video_id: &str) -> Result<serde_json::Value> {
        let url = format!("https://www.youtube.com/watch?v={}", video_id);

        let mut command = tokio::process::Command::new("yt-dlp");
        command.args(["--dump-json", "--skip-download", "--no-warnings"]);
        if let Some(cookies) = self.cookies_file.as_ref().filter(|p| p.exists()) {
            debug!("Using cookies from: {}", cookies.display());
            command.arg("--cookies").arg(cookies);
        }
        command.arg(&url);

        let output = command.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TubeMindError::ToolNotFound("yt-dlp".to_string())
            } else {
                TubeMindError::CaptionSource(format!("Failed to run yt-dlp: {}", e))
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TubeMindError::CaptionSource(format!(
                "Error fetching transcript for {}: {}",
                video_id,
                stderr.trim()
            )));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        serde_json::from_str(&json_str).map_err(|e| {
            TubeMindError::CaptionSource(format!("Failed to parse yt-dlp output: {}", e))
        })
    }

    /// Candidate json3 track URLs, manual subtitles before automatic captions.
    fn track_urls(&self, info: &serde_json::Value) -> Vec<(&'static str, String)> {
        let mut urls = Vec::new();
        for (kind, key) in [("manual", "subtitles"), ("automatic", "automatic_captions")] {
            for lang in &self.languages {
                let Some(tracks) = info[key][lang.as_str()].as_array() else {
                    continue;
                };
                let track = tracks
                    .iter()
                    .find(|t| t["ext"].as_str() == Some("json3"));
                if let Some(url) = track.and_then(|t| t["url"].as_str()) {
                    urls.push((kind, url.to_string()));
                }
            }
        }
        urls
    }

    async fn download_track(&self, url: &str) -> Result<Vec<CaptionSegment>> {
        let body = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_json3(&body)
    }
}

#[async_trait]
impl CaptionSource for YoutubeCaptions {
    #[instrument(skip(self))]
    async fn fetch(&self, video_id: &str) -> Result<Vec<CaptionSegment>> {
        let info = self.fetch_info_ytdlp(video_id).await?;

        for (kind, url) in self.track_urls(&info) {
            match self.download_track(&url).await {
                Ok(segments) if !segments.is_empty() => {
                    info!("Fetched {} {} caption segments", segments.len(), kind);
                    return Ok(segments);
                }
                Ok(_) => debug!("Empty {} caption track, trying next", kind),
                Err(e) => warn!("Error parsing {} captions: {}", kind, e),
            }
        }

        Err(TubeMindError::NoCaptionsAvailable(video_id.to_string()))
    }
}

#[derive(Deserialize)]
struct Json3 {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    start_ms: Option<f64>,
    #[serde(rename = "dDurationMs")]
    duration_ms: Option<f64>,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a YouTube `json3` caption payload into segments.
///
/// Events without text runs or a start time are skipped, as are events
/// whose joined text is blank.
pub fn parse_json3(payload: &str) -> Result<Vec<CaptionSegment>> {
    let doc: Json3 = serde_json::from_str(payload)?;

    let segments = doc
        .events
        .into_iter()
        .filter_map(|event| {
            let start_ms = event.start_ms?;
            let segs = event.segs?;
            let text: String = segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(CaptionSegment::new(
                text,
                start_ms / 1000.0,
                event.duration_ms.unwrap_or(0.0) / 1000.0,
            ))
        })
        .collect();

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json3() {
        let payload = json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 3000, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
                {"tStartMs": 3000, "dDurationMs": 500, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 3500, "segs": [{"utf8": "no duration"}]},
                {"dDurationMs": 1000, "segs": [{"utf8": "no start"}]},
                {"tStartMs": 9000, "dDurationMs": 1000}
            ]
        })
        .to_string();

        let segments = parse_json3(&payload).unwrap();
        assert_eq!(
            segments,
            vec![
                CaptionSegment::new("hello world", 0.0, 3.0),
                CaptionSegment::new("no duration", 3.5, 0.0),
            ]
        );
    }

    #[test]
    fn test_parse_json3_without_events() {
        assert!(parse_json3("{}").unwrap().is_empty());
        assert!(parse_json3("not json").is_err());
    }

    #[test]
    fn test_track_urls_prefer_manual_then_language_order() {
        let captions = YoutubeCaptions::new(&CaptionSettings::default(), None);
        let info = json!({
            "subtitles": {
                "en-GB": [{"ext": "vtt", "url": "https://x/vtt"}, {"ext": "json3", "url": "https://x/gb"}]
            },
            "automatic_captions": {
                "en": [{"ext": "json3", "url": "https://x/auto-en"}],
                "fr": [{"ext": "json3", "url": "https://x/auto-fr"}]
            }
        });

        let urls = captions.track_urls(&info);
        assert_eq!(
            urls,
            vec![
                ("manual", "https://x/gb".to_string()),
                ("automatic", "https://x/auto-en".to_string()),
            ]
        );
    }
}
