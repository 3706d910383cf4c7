//! Model-candidate evaluation over a dendrogram.
//!
//! Picks an initial partition for the mixture refiner by scoring cuts of
//! the merge hierarchy with a variance-ratio statistic:
//!
//! ```text
//! W = Σ_clusters Σ_members (1 - cos(centroid, member))²
//! B = Σ_clusters |cluster| × (1 - cos(centroid, meta))²
//! C = B(n - k) / (W(k - 1))
//! ```
//!
//! where a *centroid* is the elementwise **sum** (not average) of member
//! vectors, `meta` is the sum over all candidate members, `n` is the total
//! member count of the candidate and `k` its cluster count.
//!
//! A candidate of size `k` is the prefix of the dendrogram's snapshot list
//! sorted by size descending. Snapshots overlap (a later merge contains the
//! members of earlier ones), and members are counted as listed; the first
//! candidate cluster is always the all-documents snapshot.
//!
//! The scan walks `k` from `len - 1` downward, tracking the running maximum
//! of `C`, and stops at the first strict decrease, selecting `k - 1`
//! clusters at the stopping point. This finds the first local maximum while
//! decreasing cluster count, not the global maximum. `k == 1` is excluded
//! from the scan: its `(k - 1)` denominator is zero and the statistic is
//! undefined, so the scan floor is `k == 2` and a never-decreasing `C`
//! selects the floor candidate.

use crate::cluster::{cosine_similarity, Cluster, Dendrogram};
use crate::error::{Error, Result};

/// A selected initial model: quality score plus cluster memberships.
#[derive(Debug, Clone)]
pub struct SelectedModel {
    /// Highest variance-ratio score seen before the scan stopped.
    pub score: f64,
    /// Member document ids per selected cluster.
    pub clusters: Vec<Vec<usize>>,
}

impl SelectedModel {
    /// Number of clusters in the selected model.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }
}

/// Scan the dendrogram's candidate cuts and select an initial partition.
///
/// `vectors` must be the same table the dendrogram was built from.
/// Dendrograms with fewer than three snapshots have nothing to scan and
/// fall back to a single all-documents cluster with score 0.
pub fn select_model(dendrogram: &Dendrogram, vectors: &[Vec<f64>]) -> Result<SelectedModel> {
    if vectors.len() != dendrogram.n_docs() {
        return Err(Error::DimensionMismatch {
            expected: dendrogram.n_docs(),
            found: vectors.len(),
        });
    }

    let sorted = dendrogram.by_size_desc();
    if sorted.len() < 3 {
        let clusters = match dendrogram.snapshots().last() {
            Some(c) => vec![c.members().to_vec()],
            None => vec![(0..dendrogram.n_docs()).collect()],
        };
        return Ok(SelectedModel {
            score: 0.0,
            clusters,
        });
    }

    let mut local_max = 0.0;
    for i in (2..sorted.len()).rev() {
        let c = variance_ratio(&sorted[..i], vectors);
        if c < local_max {
            return Ok(SelectedModel {
                score: local_max,
                clusters: members_of(&sorted[..i - 1]),
            });
        }
        local_max = c;
    }

    // C never decreased: the floor candidate wins.
    Ok(SelectedModel {
        score: local_max,
        clusters: members_of(&sorted[..2]),
    })
}

fn members_of(clusters: &[&Cluster]) -> Vec<Vec<usize>> {
    clusters.iter().map(|c| c.members().to_vec()).collect()
}

/// Variance-ratio statistic for one candidate.
///
/// A zero within-cluster score makes the ratio `+∞` when there is any
/// between-cluster spread, and `0` when there is none.
fn variance_ratio(clusters: &[&Cluster], vectors: &[Vec<f64>]) -> f64 {
    let k = clusters.len();
    let dim = vectors.first().map_or(0, Vec::len);

    let centroids: Vec<Vec<f64>> = clusters
        .iter()
        .map(|c| {
            let mut sum = vec![0.0; dim];
            for &m in c.members() {
                for (s, x) in sum.iter_mut().zip(&vectors[m]) {
                    *s += x;
                }
            }
            sum
        })
        .collect();

    let mut meta = vec![0.0; dim];
    for centroid in &centroids {
        for (s, x) in meta.iter_mut().zip(centroid) {
            *s += x;
        }
    }

    let mut n = 0usize;
    let mut within = 0.0;
    let mut between = 0.0;
    for (cluster, centroid) in clusters.iter().zip(&centroids) {
        n += cluster.len();
        for &m in cluster.members() {
            let d = 1.0 - cosine_similarity(centroid, &vectors[m]);
            within += d * d;
        }
        let d = 1.0 - cosine_similarity(centroid, &meta);
        between += cluster.len() as f64 * d * d;
    }

    let numer = between * (n - k) as f64;
    let denom = within * (k - 1) as f64;
    if denom == 0.0 {
        if numer > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    } else {
        numer / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Hac;

    fn two_topic_vectors() -> Vec<Vec<f64>> {
        vec![
            vec![2.0, 1.0, 0.0, 0.0],
            vec![1.0, 2.0, 0.0, 0.0],
            vec![0.0, 0.0, 2.0, 1.0],
            vec![0.0, 0.0, 1.0, 2.0],
        ]
    }

    #[test]
    fn test_four_documents_select_two_clusters() {
        let vectors = two_topic_vectors();
        let dendro = Hac::new().build(&vectors).unwrap();
        let model = select_model(&dendro, &vectors).unwrap();

        // Three snapshots, one scannable candidate (the k = 2 floor).
        assert_eq!(model.n_clusters(), 2);
        assert!(model.score > 0.0);
        // Largest snapshot first: all documents, then the first topic pair.
        assert_eq!(model.clusters[0].len(), 4);
        assert_eq!(model.clusters[1].len(), 2);
    }

    #[test]
    fn test_two_document_corpus_degenerates_to_one_cluster() {
        let vectors = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let dendro = Hac::new().build(&vectors).unwrap();
        let model = select_model(&dendro, &vectors).unwrap();

        assert_eq!(model.n_clusters(), 1);
        assert_eq!(model.score, 0.0);
        assert_eq!(model.clusters[0].len(), 2);
    }

    #[test]
    fn test_single_document_degenerates_to_one_cluster() {
        let vectors = vec![vec![1.0, 0.0]];
        let dendro = Hac::new().build(&vectors).unwrap();
        let model = select_model(&dendro, &vectors).unwrap();

        assert_eq!(model.clusters, vec![vec![0]]);
    }

    #[test]
    fn test_scan_stops_at_first_decrease() {
        // Six documents, two clean topics of three identical vectors each.
        // Sorted snapshots: [all(6), topicA(3), topicB(3), pairA(2), pairB(2)].
        // C rises from k=4 to k=3 and collapses at k=2, so the scan stops
        // there and selects k = 1: the all-documents snapshot alone.
        let vectors = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ];
        let dendro = Hac::new().build(&vectors).unwrap();
        let model = select_model(&dendro, &vectors).unwrap();

        assert_eq!(model.n_clusters(), 1);
        assert_eq!(model.clusters[0].len(), 6);
        // Score is the running maximum before the decrease, C at k = 3.
        assert!((model.score - 4.5).abs() < 1e-9);
    }

    #[test]
    fn test_scan_visits_each_candidate_once() {
        // The scan covers k = len-1 down to the k = 2 floor; with three
        // snapshots the only candidate is k = 2, and the returned score is
        // that candidate's statistic.
        let vectors = two_topic_vectors();
        let dendro = Hac::new().build(&vectors).unwrap();

        let sorted = dendro.by_size_desc();
        let expected = variance_ratio(&sorted[..2], &vectors);
        let model = select_model(&dendro, &vectors).unwrap();
        assert_eq!(model.score, expected);
    }

    #[test]
    fn test_zero_within_spread_is_infinite() {
        // Two identical-member clusters pointing different ways: W == 0,
        // B > 0.
        let vectors = vec![
            vec![1.0, 0.0],
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![0.0, 1.0],
        ];
        let dendro = Hac::new().build(&vectors).unwrap();
        let sorted = dendro.by_size_desc();
        // Candidate [all, first-pair]: the pair has zero within spread but
        // the all-documents cluster does not, so C stays finite here; use
        // the pair snapshots directly instead.
        let pairs = [sorted[1], sorted[2]];
        assert_eq!(variance_ratio(&pairs, &vectors), f64::INFINITY);
    }

    #[test]
    fn test_mismatched_vector_table_error() {
        let vectors = two_topic_vectors();
        let dendro = Hac::new().build(&vectors).unwrap();
        let short = &vectors[..3];
        assert!(matches!(
            select_model(&dendro, short),
            Err(Error::DimensionMismatch {
                expected: 4,
                found: 3
            })
        ));
    }
}
