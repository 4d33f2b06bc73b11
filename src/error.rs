//! Error types for the spamsift classifier.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for spamsift operations.
#[derive(Error, Debug)]
pub enum SpamSiftError {
    /// A trained artifact could not be loaded.
    #[error("Asset unavailable: {path}: {reason}")]
    AssetUnavailable {
        /// Location of the artifact.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// A linguistic resource (stopwords, lemma dictionary) is absent.
    #[error("Linguistic resource missing: {0}")]
    ResourceMissing(String),

    /// Vectorizer, selector and classifier disagree on a column count.
    #[error("Dimension mismatch at {stage}: expected {expected} columns, got {actual}")]
    DimensionMismatch {
        /// Pipeline stage that detected the mismatch.
        stage: &'static str,
        /// Width the stage was trained for.
        expected: usize,
        /// Width it actually received.
        actual: usize,
    },

    /// Input rejected by the configured empty-input policy.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Classifier produced a label outside {0, 1}.
    #[error("Unknown class label: {0}")]
    UnknownLabel(i64),

    /// Artifact content is structurally invalid.
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for spamsift operations.
pub type Result<T> = std::result::Result<T, SpamSiftError>;

impl SpamSiftError {
    /// Builds an [`SpamSiftError::AssetUnavailable`] for `path`.
    pub fn asset_unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SpamSiftError::AssetUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true for errors that must stop the service from serving.
    pub fn is_startup_fatal(&self) -> bool {
        matches!(
            self,
            SpamSiftError::AssetUnavailable { .. }
                | SpamSiftError::ResourceMissing(_)
                | SpamSiftError::Config(_)
        )
    }
}

impl From<bincode::Error> for SpamSiftError {
    fn from(err: bincode::Error) -> Self {
        SpamSiftError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for SpamSiftError {
    fn from(err: serde_json::Error) -> Self {
        SpamSiftError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = SpamSiftError::DimensionMismatch {
            stage: "selector",
            expected: 10,
            actual: 12,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch at selector: expected 10 columns, got 12"
        );
        assert!(!err.is_startup_fatal());
    }

    #[test]
    fn test_startup_fatal() {
        assert!(SpamSiftError::asset_unavailable("model.json", "not found").is_startup_fatal());
        assert!(SpamSiftError::ResourceMissing("index.noun".into()).is_startup_fatal());
        assert!(!SpamSiftError::InvalidInput("empty".into()).is_startup_fatal());
    }
}
