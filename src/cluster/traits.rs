//! Strategy traits for agglomerative clustering.

/// Pointwise dissimilarity between two document vectors.
///
/// Implementations must return a non-negative value and be symmetric in
/// their arguments.
pub trait Dissimilarity {
    /// Dissimilarity between two vectors of equal dimension.
    fn dissimilarity(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Inter-cluster dissimilarity derived from member-level dissimilarities.
///
/// `a` and `b` are member document ids indexing into the shared `vectors`
/// table (one row per document).
pub trait Agglomeration {
    /// Dissimilarity between two clusters given their member ids.
    fn cluster_dissimilarity(&self, a: &[usize], b: &[usize], vectors: &[Vec<f64>]) -> f64;
}
