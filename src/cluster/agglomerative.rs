//! Hierarchical agglomerative clustering (HAC) engine.
//!
//! Bottom-up clustering: every document starts as a singleton cluster, and
//! the least-dissimilar pair of active clusters is merged until one cluster
//! remains. Each merge is recorded in a [`Dendrogram`] along with a snapshot
//! of the surviving cluster.
//!
//! Determinism is part of the contract:
//!
//! - Candidate pairs are visited in active-list order `(i, j)` with `i < j`,
//!   and the minimum is taken with a strict `<`, so ties go to the first
//!   pair encountered.
//! - The lower-indexed cluster of the winning pair absorbs the other, and
//!   the absorbed entry is removed without disturbing the order of the rest.
//!
//! The very first iteration scores pairs with the pointwise
//! [`Dissimilarity`] on document vectors; all later iterations use the
//! [`Agglomeration`] strategy over cluster memberships. The pairwise matrix
//! is recomputed from scratch after every merge (`O(k²)` per step); with the
//! `parallel` feature the independent pair scores are computed with rayon
//! while the argmin scan stays sequential, leaving results unchanged.

use super::cosine::CosineDistance;
use super::dendrogram::{Cluster, Dendrogram};
use super::linkage::AverageLinkage;
use super::traits::{Agglomeration, Dissimilarity};
use crate::error::{Error, Result};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// HAC engine parameterized over pointwise and cluster-level strategies.
#[derive(Debug, Clone, Default)]
pub struct Hac<D = CosineDistance, L = AverageLinkage> {
    point: D,
    linkage: L,
}

impl Hac<CosineDistance, AverageLinkage> {
    /// HAC with cosine distance and average linkage.
    pub fn new() -> Self {
        Self {
            point: CosineDistance::new(),
            linkage: AverageLinkage::new(),
        }
    }
}

impl<D, L> Hac<D, L>
where
    D: Dissimilarity + Sync,
    L: Agglomeration + Sync,
{
    /// HAC with explicit strategies.
    pub fn with_strategies(point: D, linkage: L) -> Self {
        Self { point, linkage }
    }

    /// Build the full dendrogram for a set of document vectors.
    ///
    /// Returns [`Error::EmptyInput`] for an empty set. A single document
    /// yields an empty dendrogram (no pair to compare). Otherwise the
    /// result records exactly `n - 1` merges.
    pub fn build(&self, vectors: &[Vec<f64>]) -> Result<Dendrogram> {
        if vectors.is_empty() {
            return Err(Error::EmptyInput);
        }

        let dim = vectors[0].len();
        for v in vectors {
            if v.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: v.len(),
                });
            }
        }

        let n = vectors.len();
        let mut dendrogram = Dendrogram::new(n);
        let mut active: Vec<Cluster> = (0..n).map(|id| Cluster::singleton(id, id)).collect();
        let mut first_pass = true;

        while active.len() > 1 {
            let Some((i, j)) = self.closest_pair(&active, vectors, first_pass) else {
                break;
            };
            first_pass = false;

            // Lower active index survives; j > i, so removing j first keeps
            // i valid.
            let from = active.remove(j);
            let to = &mut active[i];
            to.absorb(&from);
            dendrogram.record(to.id(), from.id(), to.clone());
        }

        Ok(dendrogram)
    }

    /// Index pair (into the active list) with minimal dissimilarity.
    ///
    /// Scores are computed per pair; the argmin scan runs sequentially in
    /// visit order so the first-encountered tie-break is stable regardless
    /// of how the scores were produced.
    fn closest_pair(
        &self,
        active: &[Cluster],
        vectors: &[Vec<f64>],
        first_pass: bool,
    ) -> Option<(usize, usize)> {
        let k = active.len();
        let mut pairs = Vec::with_capacity(k * (k - 1) / 2);
        for i in 0..k - 1 {
            for j in i + 1..k {
                pairs.push((i, j));
            }
        }

        let score = |&(i, j): &(usize, usize)| -> f64 {
            let (a, b) = (&active[i], &active[j]);
            if first_pass {
                self.point
                    .dissimilarity(&vectors[a.members()[0]], &vectors[b.members()[0]])
            } else {
                self.linkage
                    .cluster_dissimilarity(a.members(), b.members(), vectors)
            }
        };

        #[cfg(feature = "parallel")]
        let scores: Vec<f64> = pairs.par_iter().map(score).collect();

        #[cfg(not(feature = "parallel"))]
        let scores: Vec<f64> = pairs.iter().map(score).collect();

        let mut best: Option<(usize, usize)> = None;
        let mut best_score = f64::INFINITY;
        for (&pair, &s) in pairs.iter().zip(&scores) {
            if s < best_score {
                best_score = s;
                best = Some(pair);
            }
        }
        best
    }
}
