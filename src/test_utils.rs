//! Test doubles for the remote collaborators.
//!
//! Only compiled when running tests. Every fake is deterministic and
//! records how it was called.

use crate::captions::{CaptionSegment, CaptionSource};
use crate::embedding::EmbeddingProvider;
use crate::error::{Result, TubeMindError};
use crate::generation::{GenerationParams, TextGenerator};
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Embedder that derives vectors from a hash of the text.
pub struct FakeEmbedder {
    dimensions: usize,
    reported_dimensions: usize,
    overrides: HashMap<String, Vec<f32>>,
    batches: Mutex<Vec<usize>>,
}

impl FakeEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            reported_dimensions: dimensions,
            overrides: HashMap::new(),
            batches: Mutex::new(Vec::new()),
        }
    }

    /// Pin the vector returned for an exact text.
    pub fn with_vector(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.overrides.insert(text.to_string(), vector);
        self
    }

    /// Report a dimension that differs from the vectors actually produced.
    pub fn with_reported_dimensions(mut self, dimensions: usize) -> Self {
        self.reported_dimensions = dimensions;
        self
    }

    pub fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(v) = self.overrides.get(text) {
            return v.clone();
        }
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();
        (0..self.dimensions)
            .map(|i| ((hash >> ((i % 8) * 8)) & 0xff) as f32 / 255.0 + i as f32 * 0.001)
            .collect()
    }

    /// Sizes of the batches received so far.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.batches.lock().unwrap().push(texts.len());
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.reported_dimensions
    }
}

/// Embedder whose n-th call (1-based) fails.
pub struct FailingEmbedder {
    inner: FakeEmbedder,
    fail_on_call: usize,
    calls: Mutex<usize>,
}

impl FailingEmbedder {
    pub fn new(dimensions: usize, fail_on_call: usize) -> Self {
        Self {
            inner: FakeEmbedder::new(dimensions),
            fail_on_call,
            calls: Mutex::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let call = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        if call == self.fail_on_call {
            return Err(TubeMindError::RemoteEmbedding(
                "429 Too Many Requests".to_string(),
            ));
        }
        self.inner.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }
}

/// Generator that echoes a canned reply and records every prompt.
pub struct FakeGenerator {
    reply: String,
    fail: bool,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl FakeGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            fail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("")
        }
    }

    pub fn calls(&self) -> Vec<(String, GenerationParams)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls.lock().unwrap().last().map(|(p, _)| p.clone())
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), params.clone()));
        if self.fail {
            return Err(TubeMindError::RemoteGeneration(
                "503 Service Unavailable".to_string(),
            ));
        }
        Ok(self.reply.clone())
    }
}

/// Caption source backed by a fixed map of video id to segments.
#[derive(Default)]
pub struct FakeCaptions {
    videos: HashMap<String, Vec<CaptionSegment>>,
    delay: Duration,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FakeCaptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video_id: &str, segments: Vec<CaptionSegment>) -> Self {
        self.videos.insert(video_id.to_string(), segments);
        self
    }

    /// Hold every fetch open for `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Highest number of fetches seen in flight at once.
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CaptionSource for FakeCaptions {
    async fn fetch(&self, video_id: &str) -> Result<Vec<CaptionSegment>> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.active.fetch_sub(1, Ordering::SeqCst);

        self.videos
            .get(video_id)
            .cloned()
            .ok_or_else(|| TubeMindError::NoCaptionsAvailable(video_id.to_string()))
    }
}
