//! Agglomerative clustering over document vectors.
//!
//! This module is the middle of the pipeline: it takes the TF-IDF vectors
//! produced by [`crate::vectorize`] and grows a merge hierarchy over them.
//!
//! ## Pieces
//!
//! - [`Dissimilarity`] / [`Agglomeration`]: the two pluggable strategy
//!   seams. The first scores a pair of document vectors, the second scores
//!   a pair of clusters from member-level scores.
//! - [`CosineDistance`]: `1 - cos(a, b)`, with zero-norm vectors defined as
//!   similarity 0.
//! - [`AverageLinkage`]: group-average linkage, the mean pairwise
//!   dissimilarity over the cross product of members.
//! - [`Cluster`] / [`Dendrogram`]: the merge record. Clusters are mutated
//!   in place by [`Cluster::absorb`]; the dendrogram keeps one post-merge
//!   snapshot per merge.
//! - [`Hac`]: the engine. Greedy nearest-pair merging with a deterministic
//!   first-encountered tie-break.
//!
//! ## Usage
//!
//! ```rust
//! use covey::cluster::Hac;
//!
//! let vectors = vec![
//!     vec![2.0, 1.0, 0.0, 0.0],
//!     vec![1.0, 2.0, 0.0, 0.0],
//!     vec![0.0, 0.0, 2.0, 1.0],
//!     vec![0.0, 0.0, 1.0, 2.0],
//! ];
//!
//! let dendrogram = Hac::new().build(&vectors).unwrap();
//! assert_eq!(dendrogram.n_merges(), 3);
//! ```

mod agglomerative;
mod cosine;
mod dendrogram;
mod linkage;
mod traits;

pub use agglomerative::Hac;
pub use cosine::{cosine_similarity, CosineDistance};
pub use dendrogram::{Cluster, Dendrogram, Merge};
pub use linkage::AverageLinkage;
pub use traits::{Agglomeration, Dissimilarity};
