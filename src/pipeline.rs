//! End-to-end clustering pipeline.
//!
//! Composes the four stages: vectorize → agglomerate → select → refine.
//!
//! ```rust
//! use covey::Pipeline;
//!
//! let docs: Vec<Vec<&str>> = vec![
//!     "cat cat dog".split_whitespace().collect(),
//!     "cat dog dog".split_whitespace().collect(),
//!     "car truck bus".split_whitespace().collect(),
//!     "truck car bus".split_whitespace().collect(),
//! ];
//!
//! let outcome = Pipeline::new().run(&docs).unwrap();
//! assert_eq!(outcome.partition, vec![vec![0, 1], vec![2, 3]]);
//! ```

use crate::cluster::{Agglomeration, AverageLinkage, CosineDistance, Dendrogram, Dissimilarity, Hac};
use crate::error::Result;
use crate::mixture::{MixtureRefiner, Partition};
use crate::select::select_model;
use crate::vectorize::{VectorSpace, Vectorizer};

/// Everything the pipeline produced, kept for introspection.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Dictionary, weight rows and count rows.
    pub space: VectorSpace,
    /// Full merge history.
    pub dendrogram: Dendrogram,
    /// Variance-ratio score of the selected initial model.
    pub score: f64,
    /// Final partition after mixture refinement.
    pub partition: Partition,
}

/// The full unsupervised pipeline with pluggable clustering strategies.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<D = CosineDistance, L = AverageLinkage> {
    vectorizer: Vectorizer,
    hac: Hac<D, L>,
    refiner: MixtureRefiner,
}

impl Pipeline<CosineDistance, AverageLinkage> {
    /// Pipeline with cosine distance, average linkage and default EM bounds.
    pub fn new() -> Self {
        Self {
            vectorizer: Vectorizer::new(),
            hac: Hac::new(),
            refiner: MixtureRefiner::new(),
        }
    }
}

impl<D, L> Pipeline<D, L>
where
    D: Dissimilarity + Sync,
    L: Agglomeration + Sync,
{
    /// Pipeline with explicit clustering strategies.
    pub fn with_strategies(point: D, linkage: L) -> Self {
        Self {
            vectorizer: Vectorizer::new(),
            hac: Hac::with_strategies(point, linkage),
            refiner: MixtureRefiner::new(),
        }
    }

    /// Set the EM safety iteration bound.
    pub fn with_max_em_iter(mut self, max_iter: usize) -> Self {
        self.refiner = self.refiner.with_max_iter(max_iter);
        self
    }

    /// Run all four stages over a tokenized corpus.
    ///
    /// A single-document corpus has no pair to compare; it falls through
    /// the stages as a one-component partition.
    pub fn run<S: AsRef<str>>(&self, documents: &[Vec<S>]) -> Result<PipelineOutcome> {
        let space = self.vectorizer.fit(documents)?;
        let dendrogram = self.hac.build(space.weights())?;
        let model = select_model(&dendrogram, space.weights())?;
        let partition = self
            .refiner
            .refine(&model.clusters, space.counts(), space.n_terms())?;

        Ok(PipelineOutcome {
            space,
            dendrogram,
            score: model.score,
            partition,
        })
    }
}
