//! Cosine distance.

use super::traits::Dissimilarity;

/// Cosine similarity between two vectors.
///
/// Defined as `0` when either vector has zero norm; raw TF-IDF vectors can
/// legitimately be all-zero (every term shared by all documents), and the
/// guard keeps the division well-defined.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Cosine distance: `1 - cosine_similarity`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CosineDistance;

impl CosineDistance {
    /// Create a new cosine distance strategy.
    pub fn new() -> Self {
        Self
    }
}

impl Dissimilarity for CosineDistance {
    fn dissimilarity(&self, a: &[f64], b: &[f64]) -> f64 {
        1.0 - cosine_similarity(a, b)
    }
}
