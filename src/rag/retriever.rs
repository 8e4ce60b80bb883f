//! Query-time retrieval against a video's index.

use crate::embedding::EmbeddingClient;
use crate::error::{Result, TubeMindError};
use crate::vector_store::{SearchResult, VectorIndex};
use tracing::{debug, instrument};

/// Embeds queries and ranks a video's chunks by distance.
#[derive(Clone)]
pub struct Retriever {
    embedder: EmbeddingClient,
}

impl Retriever {
    pub fn new(embedder: EmbeddingClient) -> Self {
        Self { embedder }
    }

    /// Return up to `top_k` chunks nearest to `query`, nearest first.
    #[instrument(skip(self, index), fields(rows = index.len()))]
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
        index: &VectorIndex,
    ) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed_query(query).await?;
        let hits = index.search(&query_embedding, top_k)?;

        let results = hits
            .into_iter()
            .map(|(row, score)| {
                let chunk = index.chunk(row).cloned().ok_or_else(|| {
                    TubeMindError::InvalidInput(format!("search returned unknown row {}", row))
                })?;
                Ok(SearchResult { chunk, score })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Retrieved {} chunks", results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::Chunk;
    use crate::test_utils::FakeEmbedder;
    use std::sync::Arc;
    use std::time::Duration;

    fn index() -> VectorIndex {
        VectorIndex::from_parts(
            2,
            vec![
                Chunk::new("cooking pasta", 0.0, 30.0),
                Chunk::new("rust ownership", 30.0, 60.0),
                Chunk::new("rust borrowing", 60.0, 90.0),
            ],
            vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.9, 0.2]],
        )
        .unwrap()
    }

    fn retriever() -> Retriever {
        let provider =
            Arc::new(FakeEmbedder::new(2).with_vector("tell me about rust", vec![1.0, 0.0]));
        Retriever::new(EmbeddingClient::new(provider).with_cooldown(Duration::ZERO))
    }

    #[tokio::test]
    async fn test_retrieve_maps_rows_to_chunks() {
        let results = retriever()
            .retrieve("tell me about rust", 2, &index())
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.text, "rust ownership");
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[1].chunk.text, "rust borrowing");
        assert!(results[0].score <= results[1].score);
    }

    #[tokio::test]
    async fn test_top_k_larger_than_index() {
        let results = retriever()
            .retrieve("tell me about rust", 10, &index())
            .await
            .unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[2].chunk.text, "cooking pasta");
    }

    #[tokio::test]
    async fn test_unbuilt_index() {
        let err = retriever()
            .retrieve("tell me about rust", 2, &VectorIndex::new(2))
            .await
            .unwrap_err();
        assert!(matches!(err, TubeMindError::IndexNotBuilt(_)));
    }
}
