//! # Spamsift - Short Message Spam Classifier
//!
//! Spamsift decides whether a short message (email, SMS) is spam using a
//! pre-trained bag-of-words model.
//!
//! ## Overview
//!
//! Classification is a pure function of the message text and an immutable
//! set of trained artifacts:
//!
//! ```text
//! raw text -> lowercase -> sentences -> words -> alphanumeric filter
//!          -> stopword/punctuation filter -> lemmas -> "tok tok tok"
//!          -> vectorizer -> feature selector -> classifier -> SPAM | NOT_SPAM
//! ```
//!
//! ## Key Features
//!
//! - **Treebank-compatible tokenization** with sentence splitting
//! - **WordNet noun lemmatization** from a local dictionary directory
//! - **Pluggable model stages** behind the [`Vectorizer`], [`FeatureSelector`]
//!   and [`Classifier`] traits
//! - **JSON and binary artifact formats** for exported models
//! - **Parallel batch prediction** via rayon
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use spamsift::{Config, SpamFilter};
//!
//! let config = Config::from_file("spamsift.json")?;
//! let filter = SpamFilter::from_config(&config)?;
//!
//! let prediction = filter.predict("WIN a FREE prize, click now!")?;
//! println!("{}", prediction.verdict);
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Normalization pipeline
//! - [`model`] - Model stage traits and trained implementations
//! - [`storage`] - Artifact files
//! - [`pipeline`] - End-to-end classification
//! - [`shared`] - Load-once bundle for concurrent hosts
//! - [`verdict`] - Classification outcome

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod shared;
pub mod storage;
pub mod text;
pub mod verdict;

// Re-export commonly used types
pub use config::{
    AlnumPolicy, AssetConfig, Config, EmptyInputPolicy, InferenceConfig, LinguisticConfig,
    TextConfig, UnicodeForm,
};
pub use error::{Result, SpamSiftError};
pub use model::{
    BundleSummary, Classifier, CountVectorizer, FeatureSelector, FeatureVector, LinearModel,
    ModelBundle, MultinomialNb, SupportSelector, Vectorizer,
};
pub use pipeline::{classify, SpamFilter};
pub use shared::SharedBundle;
pub use storage::{ClassifierArtifact, SelectorArtifact, VectorizerArtifact};
pub use text::{Lemmatizer, NormalizationTrace, NormalizedText, Normalizer, StopWords};
pub use verdict::{Prediction, Verdict};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
