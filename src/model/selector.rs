//! Column projection onto a trained feature subset.

use crate::error::{Result, SpamSiftError};
use crate::model::{FeatureSelector, FeatureVector};
use serde::{Deserialize, Serialize};

/// Keeps the columns listed in `support`, renumbered in ascending order.
///
/// This is the serving half of a univariate "select k best" step: the
/// scores that chose the columns are not needed after training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportSelector {
    n_features_in: usize,
    support: Vec<usize>,
}

impl SupportSelector {
    /// Creates a selector. `support` must be strictly increasing and every
    /// index must be below `n_features_in`.
    pub fn new(n_features_in: usize, support: Vec<usize>) -> Result<Self> {
        let selector = Self {
            n_features_in,
            support,
        };
        selector.validate()?;
        Ok(selector)
    }

    /// Creates a selector from a boolean support mask.
    pub fn from_mask(mask: &[bool]) -> Result<Self> {
        let support = mask
            .iter()
            .enumerate()
            .filter_map(|(i, &keep)| keep.then_some(i))
            .collect();
        Self::new(mask.len(), support)
    }

    /// Re-checks invariants; used after deserialization.
    pub fn validate(&self) -> Result<()> {
        if !self.support.windows(2).all(|w| w[0] < w[1]) {
            return Err(SpamSiftError::InvalidArtifact(
                "selector support is not strictly increasing".to_string(),
            ));
        }
        if let Some(&last) = self.support.last() {
            if last >= self.n_features_in {
                return Err(SpamSiftError::InvalidArtifact(format!(
                    "selector support index {} exceeds input width {}",
                    last, self.n_features_in
                )));
            }
        }
        Ok(())
    }

    /// Selected input columns.
    pub fn support(&self) -> &[usize] {
        &self.support
    }
}

impl FeatureSelector for SupportSelector {
    fn transform(&self, features: &FeatureVector) -> Result<FeatureVector> {
        features.expect_dim("selector", self.n_features_in)?;

        let entries = features
            .iter()
            .filter_map(|(col, value)| {
                self.support
                    .binary_search(&col)
                    .ok()
                    .map(|out| (out, value))
            })
            .collect();
        FeatureVector::from_entries(self.support.len(), entries)
    }

    fn n_features_in(&self) -> usize {
        self.n_features_in
    }

    fn n_features_out(&self) -> usize {
        self.support.len()
    }

    fn kind(&self) -> &'static str {
        "support"
    }
}
