//! Inference pipeline: normalize, vectorize, select, classify.

use crate::config::{Config, EmptyInputPolicy};
use crate::error::{Result, SpamSiftError};
use crate::model::ModelBundle;
use crate::text::{NormalizedText, Normalizer};
use crate::verdict::{Prediction, Verdict};
use log::{debug, info};
use rayon::prelude::*;
use std::sync::Arc;

/// Classifies one raw message.
///
/// Deterministic for a given message, normalizer and bundle. Empty or
/// whitespace-only messages are handled according to `policy`.
pub fn classify(
    raw: &str,
    normalizer: &Normalizer,
    bundle: &ModelBundle,
    policy: EmptyInputPolicy,
) -> Result<Verdict> {
    if raw.trim().is_empty() {
        match policy {
            EmptyInputPolicy::NotSpam => return Ok(Verdict::NotSpam),
            EmptyInputPolicy::Reject => {
                return Err(SpamSiftError::InvalidInput("message is empty".to_string()))
            }
            EmptyInputPolicy::Model => {}
        }
    }

    let text = normalizer.normalize(raw);
    classify_normalized(&text, bundle)
}

/// Classifies text that has already been normalized.
pub fn classify_normalized(text: &NormalizedText, bundle: &ModelBundle) -> Result<Verdict> {
    let label = bundle.predict_label(text.as_str())?;
    let verdict = Verdict::try_from(label)?;
    debug!("{:?} -> {}", text.as_str(), verdict);
    Ok(verdict)
}

/// A ready-to-serve classifier: normalizer, model bundle and policy.
///
/// Cheap to clone; clones share the loaded resources.
#[derive(Debug, Clone)]
pub struct SpamFilter {
    normalizer: Arc<Normalizer>,
    bundle: Arc<ModelBundle>,
    empty_input: EmptyInputPolicy,
}

impl SpamFilter {
    /// Creates a filter from loaded components.
    pub fn new(
        normalizer: Arc<Normalizer>,
        bundle: Arc<ModelBundle>,
        empty_input: EmptyInputPolicy,
    ) -> Self {
        Self {
            normalizer,
            bundle,
            empty_input,
        }
    }

    /// Loads linguistic resources and artifacts named in `config`.
    ///
    /// Every resource is loaded here, so a filter that exists can serve.
    pub fn from_config(config: &Config) -> Result<Self> {
        let normalizer = Normalizer::from_config(&config.text, &config.resources)?;
        let bundle = ModelBundle::load(&config.assets)?;
        info!("Spam filter ready");
        Ok(Self::new(
            Arc::new(normalizer),
            Arc::new(bundle),
            config.inference.empty_input,
        ))
    }

    /// Classifies one message.
    pub fn classify(&self, message: &str) -> Result<Verdict> {
        classify(message, &self.normalizer, &self.bundle, self.empty_input)
    }

    /// Classifies one message into a caller-facing prediction.
    pub fn predict(&self, message: &str) -> Result<Prediction> {
        self.classify(message).map(Prediction::from)
    }

    /// Classifies many messages in parallel. Results keep input order.
    pub fn predict_batch<S>(&self, messages: &[S]) -> Vec<Result<Prediction>>
    where
        S: AsRef<str> + Sync,
    {
        messages
            .par_iter()
            .map(|message| self.predict(message.as_ref()))
            .collect()
    }

    /// The normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The model bundle.
    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// The empty-input policy.
    pub fn empty_input_policy(&self) -> EmptyInputPolicy {
        self.empty_input
    }
}
