//! Multinomial-mixture refinement of an initial partition.
//!
//! Given a starting partition from model selection, iteratively re-estimate
//! a multinomial mixture and reassign documents to the highest-posterior
//! component until the likelihood stops improving.
//!
//! # The model
//!
//! Each component `i` has a Laplace-smoothed class prior and emission
//! distribution:
//!
//! ```text
//! P(cᵢ)      = (1 + |docsᵢ|) / (q + n)
//! P(wⱼ | cᵢ) = (1 + Σ_{d∈cᵢ} count(wⱼ, d)) / (V + Σ_{d∈cᵢ} Σⱼ count(wⱼ, d))
//! ```
//!
//! # The loop
//!
//! **E-step**: score every document against every component in log space,
//! `ln P(cᵢ) + Σ_{j: count>0} ln P(wⱼ|cᵢ)`, normalize to a posterior with
//! log-sum-exp, and assign each document to the arg-max component (ties to
//! the lowest index). This is hard assignment: the full posterior is
//! computed but only its arg-max is used, so the loop behaves like K-means
//! under a multinomial model rather than soft EM.
//!
//! **M-step**: recompute [`MixtureParams`] from the new partition. Params
//! are an immutable value passed between steps; the likelihood compared for
//! convergence is always the one produced under the params in effect when
//! the assignment was made.
//!
//! **Convergence**: a strict likelihood increase accepts the new partition;
//! the first non-increase stops the loop and keeps the previous partition.
//! A pathological start (e.g. a single component) therefore comes back
//! unchanged. Termination is otherwise only empirical, so a safety
//! iteration bound (default 100) caps the loop; hitting it returns the best
//! partition found, not an error.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};

/// A hard partition: component id → sorted member document ids.
pub type Partition = Vec<Vec<usize>>;

/// Mixture parameters for one iteration: class priors and per-component
/// term emission probabilities (`q × V`).
///
/// Recomputed by every M-step and read-only during the following E-step.
#[derive(Debug, Clone)]
pub struct MixtureParams {
    priors: Array1<f64>,
    emissions: Array2<f64>,
}

impl MixtureParams {
    /// Estimate parameters from a partition (the M-step; initialization is
    /// the same computation applied to the starting partition).
    fn estimate(partition: &[Vec<usize>], counts: &[Vec<u32>], vocab: usize) -> Self {
        let q = partition.len();
        let n = counts.len();

        let mut priors = Array1::zeros(q);
        let mut emissions = Array2::zeros((q, vocab));

        for (i, docs) in partition.iter().enumerate() {
            priors[i] = (1.0 + docs.len() as f64) / ((q + n) as f64);

            let mut term_sums = vec![0u64; vocab];
            let mut total = 0u64;
            for &d in docs {
                for (j, &c) in counts[d].iter().enumerate() {
                    term_sums[j] += u64::from(c);
                    total += u64::from(c);
                }
            }
            for (j, &s) in term_sums.iter().enumerate() {
                emissions[[i, j]] = (1.0 + s as f64) / ((vocab as u64 + total) as f64);
            }
        }

        Self { priors, emissions }
    }

    /// Class prior of component `i`.
    pub fn prior(&self, i: usize) -> f64 {
        self.priors[i]
    }

    /// Emission probability of term `j` under component `i`.
    pub fn emission(&self, i: usize, j: usize) -> f64 {
        self.emissions[[i, j]]
    }

    /// Number of components.
    pub fn n_components(&self) -> usize {
        self.priors.len()
    }
}

/// Hard-assignment EM refiner over a multinomial mixture.
#[derive(Debug, Clone)]
pub struct MixtureRefiner {
    max_iter: usize,
}

impl MixtureRefiner {
    /// Create a refiner with the default safety bound of 100 iterations.
    pub fn new() -> Self {
        Self { max_iter: 100 }
    }

    /// Set the safety iteration bound.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Refine an initial partition into a final one.
    ///
    /// `initial` maps component → member document ids (components may
    /// overlap; the first E-step hard-assigns every document to exactly one
    /// component). `counts` holds one raw term-count row per document with
    /// `vocab` entries each.
    pub fn refine(
        &self,
        initial: &[Vec<usize>],
        counts: &[Vec<u32>],
        vocab: usize,
    ) -> Result<Partition> {
        if counts.is_empty() || initial.is_empty() {
            return Err(Error::EmptyInput);
        }
        if self.max_iter == 0 {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be > 0",
            });
        }

        let n = counts.len();
        for row in counts {
            if row.len() != vocab {
                return Err(Error::DimensionMismatch {
                    expected: vocab,
                    found: row.len(),
                });
            }
        }
        for docs in initial {
            if docs.iter().any(|&d| d >= n) {
                return Err(Error::InvalidParameter {
                    name: "initial",
                    message: "document id out of range",
                });
            }
        }

        let q = initial.len();

        let params = MixtureParams::estimate(initial, counts, vocab);
        let (labels, mut best_ll) = e_step(&params, counts);
        let mut partition = labels_to_partition(&labels, q);

        for _iter in 1..self.max_iter {
            let params = MixtureParams::estimate(&partition, counts, vocab);
            let (labels, ll) = e_step(&params, counts);
            if ll > best_ll {
                partition = labels_to_partition(&labels, q);
                best_ll = ll;
            } else {
                break;
            }
        }

        Ok(partition)
    }
}

impl Default for MixtureRefiner {
    fn default() -> Self {
        Self::new()
    }
}

/// Score every document against every component and hard-assign each to
/// its arg-max posterior component.
///
/// Returns the assignment and the total log-likelihood of the assigned
/// components under `params` (the sum of assigned log joint scores).
fn e_step(params: &MixtureParams, counts: &[Vec<u32>]) -> (Vec<usize>, f64) {
    let q = params.n_components();
    let mut labels = Vec::with_capacity(counts.len());
    let mut total_ll = 0.0;

    for row in counts {
        let mut scores = vec![0.0; q];
        for (i, score) in scores.iter_mut().enumerate() {
            let mut s = params.prior(i).ln();
            for (j, &c) in row.iter().enumerate() {
                // Guard: only observed terms contribute, so no ln(0) from
                // a zero count ever enters the sum.
                if c > 0 {
                    s += params.emission(i, j).ln();
                }
            }
            *score = s;
        }

        let posterior = normalize_log(&scores);
        let mut best = 0;
        for (i, &p) in posterior.iter().enumerate() {
            if p > posterior[best] {
                best = i;
            }
        }

        total_ll += scores[best];
        labels.push(best);
    }

    (labels, total_ll)
}

/// Exponentiate and normalize log scores via log-sum-exp.
fn normalize_log(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max.is_infinite() {
        return vec![0.0; scores.len()];
    }
    let sum: f64 = scores.iter().map(|&s| (s - max).exp()).sum();
    scores.iter().map(|&s| (s - max).exp() / sum).collect()
}

fn labels_to_partition(labels: &[usize], q: usize) -> Partition {
    let mut partition = vec![Vec::new(); q];
    for (doc, &comp) in labels.iter().enumerate() {
        partition[comp].push(doc);
    }
    partition
}
