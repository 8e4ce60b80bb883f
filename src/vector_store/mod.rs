//! Vector indexing for embedded transcript chunks.
//!
//! Each ingested video gets its own flat index searched by exact squared L2
//! distance. Per-video chunk counts are small, so brute force is enough.

mod flat;

pub use flat::VectorIndex;

use crate::chunking::Chunk;

/// A retrieved chunk with its distance to the query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The matched chunk.
    pub chunk: Chunk,
    /// Squared Euclidean distance (lower is more relevant).
    pub score: f32,
}

/// Compute the squared Euclidean distance between two equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2() {
        assert_eq!(squared_l2(&[1.0, 2.0], &[1.0, 2.0]), 0.0);
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2(&[-1.0, 0.0, 2.0], &[1.0, 0.0, 0.0]), 8.0);
    }
}
