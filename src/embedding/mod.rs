//! Embedding generation for semantic search and retrieval.

mod client;
mod openai;

pub use client::EmbeddingClient;
pub use openai::OpenAIEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for remote embedding providers.
///
/// One call is one provider request; batching and pacing live in
/// [`EmbeddingClient`].
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, returning one vector per text in input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}
