//! Pre-trained model components and the seams between them.
//!
//! The inference pipeline only sees three traits. Concrete implementations
//! are loaded from exported artifacts (see [`crate::storage`]); tests and
//! hosts may plug in their own.

pub mod bundle;
pub mod classifier;
pub mod selector;
pub mod vectorizer;

pub use bundle::{BundleSummary, ModelBundle};
pub use classifier::{LinearModel, MultinomialNb};
pub use selector::SupportSelector;
pub use vectorizer::{CountVectorizer, CountVectorizerParams};

use crate::error::{Result, SpamSiftError};
use serde::{Deserialize, Serialize};

/// A single sparse feature row.
///
/// Entries are sorted by column, unique, and within `0..dim`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureVector {
    dim: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// An all-zero row.
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            entries: Vec::new(),
        }
    }

    /// Builds a row from arbitrary `(column, value)` pairs.
    ///
    /// Duplicate columns are summed; zero values are dropped.
    pub fn from_entries(dim: usize, mut entries: Vec<(usize, f64)>) -> Result<Self> {
        if let Some(&(col, _)) = entries.iter().find(|(col, _)| *col >= dim) {
            return Err(SpamSiftError::DimensionMismatch {
                stage: "feature vector",
                expected: dim,
                actual: col + 1,
            });
        }

        entries.sort_by_key(|(col, _)| *col);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (col, value) in entries {
            if let Some((last, sum)) = merged.last_mut() {
                if *last == col {
                    *sum += value;
                    continue;
                }
            }
            merged.push((col, value));
        }
        merged.retain(|(_, value)| *value != 0.0);

        Ok(Self {
            dim,
            entries: merged,
        })
    }

    /// Number of columns.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if every entry is zero.
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value at `col` (zero if absent).
    pub fn get(&self, col: usize) -> f64 {
        self.entries
            .binary_search_by_key(&col, |(c, _)| *c)
            .map(|i| self.entries[i].1)
            .unwrap_or(0.0)
    }

    /// Non-zero entries in column order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense weight row of the same width.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries.iter().map(|&(col, value)| value * weights[col]).sum()
    }

    /// Fails with `DimensionMismatch` unless the row is `expected` wide.
    pub fn expect_dim(&self, stage: &'static str, expected: usize) -> Result<()> {
        if self.dim != expected {
            return Err(SpamSiftError::DimensionMismatch {
                stage,
                expected,
                actual: self.dim,
            });
        }
        Ok(())
    }
}

/// Maps normalized text to a feature row using a fixed trained vocabulary.
pub trait Vectorizer: Send + Sync {
    /// Transforms one document.
    fn transform(&self, text: &str) -> Result<FeatureVector>;

    /// Width of the produced rows.
    fn n_features(&self) -> usize;

    /// Short name for diagnostics.
    fn kind(&self) -> &'static str;
}

/// Projects a feature row onto the trained subset of columns.
pub trait FeatureSelector: Send + Sync {
    /// Projects one row. Fails with `DimensionMismatch` if the row width is
    /// not [`FeatureSelector::n_features_in`].
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector>;

    /// Expected input width.
    fn n_features_in(&self) -> usize;

    /// Output width.
    fn n_features_out(&self) -> usize;

    /// Short name for diagnostics.
    fn kind(&self) -> &'static str;
}

/// Binary decision model.
pub trait Classifier: Send + Sync {
    /// Predicts the class label of one row. Fails with `DimensionMismatch`
    /// if the row width is not [`Classifier::n_features`].
    fn predict(&self, features: &FeatureVector) -> Result<i64>;

    /// Expected input width.
    fn n_features(&self) -> usize;

    /// Short name for diagnostics.
    fn kind(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_merges_and_sorts() {
        let fv = FeatureVector::from_entries(5, vec![(3, 1.0), (1, 2.0), (3, 1.0), (4, 0.0)]).unwrap();
        assert_eq!(fv.iter().collect::<Vec<_>>(), vec![(1, 2.0), (3, 2.0)]);
        assert_eq!(fv.nnz(), 2);
        assert_eq!(fv.get(3), 2.0);
        assert_eq!(fv.get(0), 0.0);
    }

    #[test]
    fn test_from_entries_out_of_range() {
        let result = FeatureVector::from_entries(2, vec![(2, 1.0)]);
        assert!(matches!(result, Err(SpamSiftError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_dot() {
        let fv = FeatureVector::from_entries(3, vec![(0, 2.0), (2, 1.0)]).unwrap();
        assert_eq!(fv.dot(&[0.5, 10.0, -1.0]), 0.0);
        assert!(FeatureVector::zeros(3).is_zero());
    }

    #[test]
    fn test_expect_dim() {
        let fv = FeatureVector::zeros(4);
        assert!(fv.expect_dim("test", 4).is_ok());
        assert!(matches!(
            fv.expect_dim("test", 5),
            Err(SpamSiftError::DimensionMismatch { expected: 5, actual: 4, .. })
        ));
    }
}
