//! Batched, rate-limited access to an embedding provider.

use super::EmbeddingProvider;
use crate::config::EmbeddingSettings;
use crate::error::{Result, TubeMindError};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Splits embedding work into provider-sized batches with a cooldown between them.
#[derive(Clone)]
pub struct EmbeddingClient {
    provider: Arc<dyn EmbeddingProvider>,
    batch_size: usize,
    cooldown: Duration,
}

impl EmbeddingClient {
    /// Create a client with the default batch size (10) and cooldown (500ms).
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            batch_size: 10,
            cooldown: Duration::from_millis(500),
        }
    }

    /// Create a client from embedding settings.
    pub fn from_settings(
        provider: Arc<dyn EmbeddingProvider>,
        settings: &EmbeddingSettings,
    ) -> Self {
        Self::new(provider)
            .with_batch_size(settings.batch_size)
            .with_cooldown(Duration::from_millis(settings.batch_delay_ms))
    }

    /// Set the number of texts sent per request (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Set the pause between consecutive batches.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Dimension of the vectors this client produces.
    pub fn dimensions(&self) -> usize {
        self.provider.dimensions()
    }

    /// Embed all texts, preserving order.
    ///
    /// The first failing batch aborts the call; no partial result is returned.
    #[instrument(skip(self, texts), fields(count = texts.len()))]
    pub async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let expected_dim = self.provider.dimensions();
        let mut all_embeddings = Vec::with_capacity(texts.len());
        let batch_count = texts.len().div_ceil(self.batch_size);

        for (i, batch) in texts.chunks(self.batch_size).enumerate() {
            let embeddings = self.provider.embed_batch(batch).await?;

            if embeddings.len() != batch.len() {
                return Err(TubeMindError::RemoteEmbedding(format!(
                    "Provider returned {} embeddings for a batch of {}",
                    embeddings.len(),
                    batch.len()
                )));
            }
            if let Some(bad) = embeddings.iter().find(|e| e.len() != expected_dim) {
                return Err(TubeMindError::DimensionMismatch {
                    expected: expected_dim,
                    actual: bad.len(),
                });
            }

            all_embeddings.extend(embeddings);
            debug!("Embedded batch {}/{}", i + 1, batch_count);

            if i + 1 < batch_count && !self.cooldown.is_zero() {
                tokio::time::sleep(self.cooldown).await;
            }
        }

        Ok(all_embeddings)
    }

    /// Embed a single query text.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>> {
        self.embed(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TubeMindError::RemoteEmbedding("Empty embedding response".to_string()))
    }
}
