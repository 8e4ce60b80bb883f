//! Flat (brute-force) L2 index.

use super::squared_l2;
use crate::chunking::Chunk;
use crate::error::{Result, TubeMindError};

/// Exact nearest-neighbor index over one video's chunks.
///
/// Row `i` holds `chunks[i]` and `vectors[i]`; the two are only ever written
/// together by [`VectorIndex::build`].
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    vectors: Vec<Vec<f32>>,
    chunks: Vec<Chunk>,
    built: bool,
}

impl VectorIndex {
    /// Create an empty, unbuilt index for vectors of `dimension`.
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            vectors: Vec::new(),
            chunks: Vec::new(),
            built: false,
        }
    }

    /// Create and build an index in one step.
    pub fn from_parts(
        dimension: usize,
        chunks: Vec<Chunk>,
        vectors: Vec<Vec<f32>>,
    ) -> Result<Self> {
        let mut index = Self::new(dimension);
        index.build(chunks, vectors)?;
        Ok(index)
    }

    /// Replace the index contents with `chunks` and their embeddings.
    ///
    /// On error the index is left unchanged.
    pub fn build(&mut self, chunks: Vec<Chunk>, vectors: Vec<Vec<f32>>) -> Result<()> {
        if chunks.len() != vectors.len() {
            return Err(TubeMindError::InvalidInput(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                vectors.len()
            )));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimension) {
            return Err(TubeMindError::DimensionMismatch {
                expected: self.dimension,
                actual: bad.len(),
            });
        }

        self.vectors = vectors;
        self.chunks = chunks;
        self.built = true;
        Ok(())
    }

    /// Find the `k` rows nearest to `query`, nearest first.
    ///
    /// Equal distances keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        if !self.built || self.vectors.is_empty() {
            return Err(TubeMindError::IndexNotBuilt("(unbuilt index)".to_string()));
        }
        if query.len() != self.dimension {
            return Err(TubeMindError::DimensionMismatch {
                expected: self.dimension,
                actual: query.len(),
            });
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(row, v)| (row, squared_l2(query, v)))
            .collect();

        // sort_by is stable, so ties stay in row order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(k);

        Ok(scored)
    }

    /// Chunk stored at `row`.
    pub fn chunk(&self, row: usize) -> Option<&Chunk> {
        self.chunks.get(row)
    }

    /// All chunks in row order.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}
