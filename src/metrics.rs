//! Clustering evaluation metrics.
//!
//! External measures for judging a predicted partition against reference
//! labels. Used by the integration tests and by downstream callers that
//! have gold groupings to compare against.
//!
//! | Metric | Range | Best | Bias |
//! |--------|-------|------|------|
//! | [`purity`] | [0, 1] | 1 | favors many small clusters |
//! | [`nmi`] | [0, 1] | 1 | normalized, comparable across corpora |

use crate::mixture::Partition;
use std::collections::HashMap;

/// Flatten a partition into one label per document.
///
/// `n_docs` bounds the label vector; documents missing from the partition
/// keep a label of `usize::MAX` (callers produce total partitions, so this
/// only matters for malformed input).
pub fn partition_labels(partition: &Partition, n_docs: usize) -> Vec<usize> {
    let mut labels = vec![usize::MAX; n_docs];
    for (comp, docs) in partition.iter().enumerate() {
        for &d in docs {
            if d < n_docs {
                labels[d] = comp;
            }
        }
    }
    labels
}

/// Purity: the fraction of documents that land in a cluster dominated by
/// their true class.
///
/// Each predicted cluster is credited with its most common true label;
/// purity is the total credit over `n`. Trivially 1.0 for singletons, so
/// read it alongside [`nmi`].
pub fn purity(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.is_empty() || pred.len() != truth.len() {
        return 0.0;
    }

    let mut majority: HashMap<usize, HashMap<usize, usize>> = HashMap::new();
    for (&p, &t) in pred.iter().zip(truth) {
        *majority.entry(p).or_default().entry(t).or_insert(0) += 1;
    }

    let correct: usize = majority
        .values()
        .map(|by_class| by_class.values().copied().max().unwrap_or(0))
        .sum();
    correct as f64 / pred.len() as f64
}

/// Normalized Mutual Information between two labelings, in [0, 1].
///
/// `2·I(U;V) / (H(U) + H(V))`, with 1.0 for labelings that are identical
/// up to renaming. Defined as 0 when either labeling has zero entropy
/// (a single cluster carries no information to share).
pub fn nmi(pred: &[usize], truth: &[usize]) -> f64 {
    if pred.is_empty() || pred.len() != truth.len() {
        return 0.0;
    }

    let n = pred.len() as f64;
    let mut joint: HashMap<(usize, usize), usize> = HashMap::new();
    let mut count_p: HashMap<usize, usize> = HashMap::new();
    let mut count_t: HashMap<usize, usize> = HashMap::new();
    for (&p, &t) in pred.iter().zip(truth) {
        *joint.entry((p, t)).or_insert(0) += 1;
        *count_p.entry(p).or_insert(0) += 1;
        *count_t.entry(t).or_insert(0) += 1;
    }

    let entropy = |counts: &HashMap<usize, usize>| -> f64 {
        counts
            .values()
            .map(|&c| {
                let p = c as f64 / n;
                -p * p.ln()
            })
            .sum()
    };
    let h_p = entropy(&count_p);
    let h_t = entropy(&count_t);
    if h_p == 0.0 || h_t == 0.0 {
        return 0.0;
    }

    let mut mutual = 0.0;
    for (&(p, t), &c) in &joint {
        let p_joint = c as f64 / n;
        let p_marg = count_p[&p] as f64 / n;
        let t_marg = count_t[&t] as f64 / n;
        mutual += p_joint * (p_joint / (p_marg * t_marg)).ln();
    }

    (2.0 * mutual / (h_p + h_t)).clamp(0.0, 1.0)
}
