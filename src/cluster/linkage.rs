//! Average-linkage (group-average) agglomeration.

use super::cosine::CosineDistance;
use super::traits::{Agglomeration, Dissimilarity};

/// Average linkage: mean pairwise dissimilarity over the `|A|×|B|` cross
/// product of member vectors.
///
/// Note the sign convention: this is the mean of `1 - cos(a, b)` over all
/// pairs (average *dissimilarity*), not one minus the average similarity of
/// normalized sums. Symmetric by construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageLinkage<D = CosineDistance> {
    point: D,
}

impl AverageLinkage<CosineDistance> {
    /// Average linkage over cosine distance.
    pub fn new() -> Self {
        Self {
            point: CosineDistance::new(),
        }
    }
}

impl<D: Dissimilarity> AverageLinkage<D> {
    /// Average linkage over an arbitrary pointwise dissimilarity.
    pub fn over(point: D) -> Self {
        Self { point }
    }
}

impl<D: Dissimilarity> Agglomeration for AverageLinkage<D> {
    fn cluster_dissimilarity(&self, a: &[usize], b: &[usize], vectors: &[Vec<f64>]) -> f64 {
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let mut sum = 0.0;
        for &i in a {
            for &j in b {
                sum += self.point.dissimilarity(&vectors[i], &vectors[j]);
            }
        }
        sum / (a.len() * b.len()) as f64
    }
}
