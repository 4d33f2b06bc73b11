//! The immutable (vectorizer, selector, classifier) triple.

use super::{Classifier, FeatureSelector, FeatureVector, Vectorizer};
use crate::config::AssetConfig;
use crate::error::{Result, SpamSiftError};
use crate::storage;
use log::info;
use serde::Serialize;
use std::fmt;

/// The three trained components, loaded together and never mutated.
///
/// Construction checks that the stage widths agree, so a bundle that exists
/// can only fail on a per-message basis if a component misbehaves.
pub struct ModelBundle {
    vectorizer: Box<dyn Vectorizer>,
    selector: Box<dyn FeatureSelector>,
    classifier: Box<dyn Classifier>,
}

impl ModelBundle {
    /// Assembles a bundle from components and validates it.
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        selector: Box<dyn FeatureSelector>,
        classifier: Box<dyn Classifier>,
    ) -> Result<Self> {
        let bundle = Self {
            vectorizer,
            selector,
            classifier,
        };
        bundle.validate()?;
        Ok(bundle)
    }

    /// Loads all three artifacts named in `assets`.
    pub fn load(assets: &AssetConfig) -> Result<Self> {
        info!("Loading vectorizer from {}", assets.vectorizer.display());
        let vectorizer = storage::load_vectorizer(&assets.vectorizer)?;

        info!("Loading selector from {}", assets.selector.display());
        let selector = storage::load_selector(&assets.selector)?;

        info!("Loading classifier from {}", assets.classifier.display());
        let classifier = storage::load_classifier(&assets.classifier)?;

        let bundle = Self::new(vectorizer, selector, classifier)?;
        info!(
            "Model bundle ready: {} -> {} -> {} features, {} classifier",
            bundle.vectorizer.n_features(),
            bundle.selector.n_features_in(),
            bundle.selector.n_features_out(),
            bundle.classifier.kind()
        );
        Ok(bundle)
    }

    /// Checks that adjacent stages agree on their widths.
    pub fn validate(&self) -> Result<()> {
        if self.vectorizer.n_features() != self.selector.n_features_in() {
            return Err(SpamSiftError::DimensionMismatch {
                stage: "selector",
                expected: self.selector.n_features_in(),
                actual: self.vectorizer.n_features(),
            });
        }
        if self.selector.n_features_out() != self.classifier.n_features() {
            return Err(SpamSiftError::DimensionMismatch {
                stage: "classifier",
                expected: self.classifier.n_features(),
                actual: self.selector.n_features_out(),
            });
        }
        Ok(())
    }

    /// The vectorizer.
    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    /// The feature selector.
    pub fn selector(&self) -> &dyn FeatureSelector {
        self.selector.as_ref()
    }

    /// The classifier.
    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    /// Runs normalized text through the three stages and returns the raw
    /// class label.
    pub fn predict_label(&self, text: &str) -> Result<i64> {
        let counts = self.vectorizer.transform(text)?;
        let selected: FeatureVector = self.selector.transform(&counts)?;
        self.classifier.predict(&selected)
    }

    /// Dimensions and kinds, for diagnostics.
    pub fn summary(&self) -> BundleSummary {
        BundleSummary {
            vectorizer: self.vectorizer.kind(),
            vocabulary_size: self.vectorizer.n_features(),
            selector: self.selector.kind(),
            selected_features: self.selector.n_features_out(),
            classifier: self.classifier.kind(),
        }
    }
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("vectorizer", &self.vectorizer.kind())
            .field("selector", &self.selector.kind())
            .field("classifier", &self.classifier.kind())
            .finish()
    }
}

/// Shape of a loaded bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BundleSummary {
    /// Vectorizer kind.
    pub vectorizer: &'static str,
    /// Vectorizer output width.
    pub vocabulary_size: usize,
    /// Selector kind.
    pub selector: &'static str,
    /// Selector output width, equal to the classifier input width.
    pub selected_features: usize,
    /// Classifier kind.
    pub classifier: &'static str,
}

impl fmt::Display for BundleSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Vectorizer: {} ({} terms)", self.vectorizer, self.vocabulary_size)?;
        writeln!(f, "Selector:   {} ({} features kept)", self.selector, self.selected_features)?;
        write!(f, "Classifier: {}", self.classifier)
    }
}
