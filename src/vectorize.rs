//! TF-IDF vectorization of tokenized documents.
//!
//! Turns a corpus of token sequences into a term dictionary and one dense
//! weighted vector per document:
//!
//! ```text
//! tf(t, d)  = 1 + log10(count(t, d))     if count > 0, else 0
//! idf(t)    = log10(N / df(t))
//! w(t, d)   = tf(t, d) × idf(t)
//! ```
//!
//! Two deliberate quirks, kept from the reference behavior:
//!
//! - **Pruning**: a term survives only if it occurs in at least two distinct
//!   documents. Singleton-document terms carry no pairwise signal for
//!   clustering and are dropped before indexing.
//! - **No normalization**: output vectors are *not* scaled to unit length.
//!   Cosine similarity downstream divides by the norms anyway, so the
//!   weights are left raw. A term present in every document gets
//!   `idf == 0` and a zero weight; no smoothing is applied.
//!
//! Dictionary indices are assigned in first-occurrence order over the
//! corpus, so vectorizing the same corpus twice yields bit-identical output.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// A set of surviving terms with a stable term → vector-index mapping.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Dictionary {
    fn insert(&mut self, term: &str) {
        if !self.index.contains_key(term) {
            self.index.insert(term.to_owned(), self.terms.len());
            self.terms.push(term.to_owned());
        }
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True when no term survived pruning.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The term at a vector index.
    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    /// The vector index of a term, if it survived pruning.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Terms in index order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Vectorizer output: dictionary plus per-document weight and count rows.
///
/// Weight rows feed the distance computations; raw count rows feed the
/// multinomial statistics of the mixture refiner. Both are indexed by
/// `[doc][dictionary position]`.
#[derive(Debug, Clone)]
pub struct VectorSpace {
    dictionary: Dictionary,
    weights: Vec<Vec<f64>>,
    counts: Vec<Vec<u32>>,
}

impl VectorSpace {
    /// The term dictionary.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// TF-IDF weight rows, one per document.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Raw term-count rows, one per document.
    pub fn counts(&self) -> &[Vec<u32>] {
        &self.counts
    }

    /// Number of documents.
    pub fn n_docs(&self) -> usize {
        self.weights.len()
    }

    /// Number of dictionary terms (vector dimensionality).
    pub fn n_terms(&self) -> usize {
        self.dictionary.len()
    }
}

/// TF-IDF vectorizer.
///
/// Stateless; configuration exists so strategy selection stays explicit at
/// the call site, matching the rest of the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Vectorizer;

impl Vectorizer {
    /// Create a new vectorizer.
    pub fn new() -> Self {
        Self
    }

    /// Build the dictionary and weighted vectors for a corpus.
    ///
    /// `documents` is an ordered sequence of token sequences. Returns
    /// [`Error::EmptyInput`] for an empty corpus and
    /// [`Error::EmptyDictionary`] when pruning removes every term.
    pub fn fit<S: AsRef<str>>(&self, documents: &[Vec<S>]) -> Result<VectorSpace> {
        if documents.is_empty() {
            return Err(Error::EmptyInput);
        }

        let n = documents.len();

        // Raw term frequency per document.
        let mut doc_counts: Vec<HashMap<&str, u32>> = Vec::with_capacity(n);
        for doc in documents {
            let mut counts: HashMap<&str, u32> = HashMap::new();
            for token in doc {
                *counts.entry(token.as_ref()).or_insert(0) += 1;
            }
            doc_counts.push(counts);
        }

        // Document frequency per term.
        let mut df: HashMap<&str, usize> = HashMap::new();
        for counts in &doc_counts {
            for &term in counts.keys() {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // Admit surviving terms in first-occurrence order so the index
        // mapping is stable across runs.
        let mut dictionary = Dictionary::default();
        for doc in documents {
            for token in doc {
                let term = token.as_ref();
                if df.get(term).copied().unwrap_or(0) >= 2 {
                    dictionary.insert(term);
                }
            }
        }

        if dictionary.is_empty() {
            return Err(Error::EmptyDictionary);
        }

        let dim = dictionary.len();
        // Document frequency per dictionary index; every surviving term has
        // an entry in `df` by construction.
        let dfs: Vec<usize> = dictionary
            .terms()
            .iter()
            .map(|t| df.get(t.as_str()).copied().unwrap_or(0))
            .collect();

        let mut weights = Vec::with_capacity(n);
        let mut counts = Vec::with_capacity(n);

        for doc_count in &doc_counts {
            let mut count_row = vec![0u32; dim];
            for (term, &c) in doc_count {
                if let Some(j) = dictionary.index_of(term) {
                    count_row[j] = c;
                }
            }

            let mut weight_row = vec![0.0f64; dim];
            for (j, &c) in count_row.iter().enumerate() {
                if c > 0 {
                    let tf = 1.0 + f64::from(c).log10();
                    let idf = (n as f64 / dfs[j] as f64).log10();
                    weight_row[j] = tf * idf;
                }
            }

            weights.push(weight_row);
            counts.push(count_row);
        }

        Ok(VectorSpace {
            dictionary,
            weights,
            counts,
        })
    }
}
