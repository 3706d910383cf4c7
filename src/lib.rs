//! # covey
//!
//! Unsupervised document clustering: TF-IDF term vectors, a hierarchical
//! agglomerative merge hierarchy with pluggable distance/linkage
//! strategies, variance-ratio model selection over the dendrogram, and a
//! hard-assignment multinomial-mixture (EM) refinement loop.
//!
//! ```text
//! tokens ─▶ Vectorizer ─▶ Hac ─▶ select_model ─▶ MixtureRefiner ─▶ partition
//! ```
//!
//! Every stage is a synchronous, deterministic computation over explicit
//! inputs; the only optional concurrency is the `parallel` feature, which
//! computes the HAC pairwise matrix with rayon without changing results.

pub mod cluster;
/// Error types used across `covey`.
pub mod error;
pub mod metrics;
pub mod mixture;
pub mod pipeline;
pub mod select;
pub mod vectorize;

#[cfg(test)]
mod pipeline_tests;

pub use cluster::{
    cosine_similarity, Agglomeration, AverageLinkage, Cluster, CosineDistance, Dendrogram,
    Dissimilarity, Hac, Merge,
};
pub use error::{Error, Result};
pub use metrics::{nmi, partition_labels, purity};
pub use mixture::{MixtureParams, MixtureRefiner, Partition};
pub use pipeline::{Pipeline, PipelineOutcome};
pub use select::{select_model, SelectedModel};
pub use vectorize::{Dictionary, VectorSpace, Vectorizer};
