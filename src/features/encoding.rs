//! Dense integer codes for arbitrary class labels

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::{AnnError, Result};

/// Enumerate a label sequence in first-occurrence order.
///
/// Returns `(label, code)` pairs where the first distinct label seen gets
/// code 0, the next distinct label code 1, and so on. Repeats of a label
/// reuse the code assigned at its first occurrence.
pub fn enumerate_labels<L: Clone + Eq + Hash>(labels: &[L]) -> Vec<(L, usize)> {
    let mut index: HashMap<L, usize> = HashMap::new();

    labels
        .iter()
        .map(|label| {
            let next = index.len();
            let code = *index.entry(label.clone()).or_insert(next);
            (label.clone(), code)
        })
        .collect()
}

/// Bijection between class labels and dense integer codes
///
/// Built once from the training labels and kept for the lifetime of a
/// trained classifier; used to encode test labels and decode predicted
/// codes. Codes cover exactly `0..len()`.
#[derive(Debug, Clone)]
pub struct LabelEncoder<L> {
    index: HashMap<L, usize>,
    labels: Vec<L>,
}

impl<L: Clone + Eq + Hash> LabelEncoder<L> {
    /// Assign codes over `labels` in first-occurrence order.
    pub fn fit(labels: &[L]) -> Self {
        let mut index: HashMap<L, usize> = HashMap::new();
        let mut distinct: Vec<L> = Vec::new();

        for label in labels {
            let next = index.len();
            if *index.entry(label.clone()).or_insert(next) == next {
                distinct.push(label.clone());
            }
        }

        LabelEncoder {
            index,
            labels: distinct,
        }
    }

    /// Code for a label, if it was present at fit time.
    pub fn encode(&self, label: &L) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Label for a code, if the code is in range.
    pub fn decode(&self, code: usize) -> Option<&L> {
        self.labels.get(code)
    }

    /// Distinct labels in code order.
    pub fn classes(&self) -> &[L] {
        &self.labels
    }

    /// Code-to-label map, for callers that want the inverse direction owned.
    pub fn inverse_map(&self) -> HashMap<usize, L> {
        self.labels
            .iter()
            .enumerate()
            .map(|(code, label)| (code, label.clone()))
            .collect()
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl<L: Clone + Eq + Hash + fmt::Display> LabelEncoder<L> {
    /// Encode a whole sequence, failing on the first label that was not
    /// present at fit time.
    pub fn encode_all(&self, labels: &[L]) -> Result<Vec<usize>> {
        labels
            .iter()
            .map(|label| {
                self.encode(label)
                    .ok_or_else(|| AnnError::UnknownLabel(label.to_string()))
            })
            .collect()
    }
}
