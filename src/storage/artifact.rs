//! Serializable forms of the three model components.

use super::format::ArtifactKind;
use crate::error::{Result, SpamSiftError};
use crate::model::{
    Classifier, CountVectorizer, CountVectorizerParams, FeatureSelector, LinearModel,
    MultinomialNb, SupportSelector, Vectorizer,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// An exported artifact that can live in a JSON or binary file.
pub trait Artifact: Sized + Serialize + DeserializeOwned {
    /// Component role, used in error messages.
    const ROLE: &'static str;

    /// Concrete kind of this value.
    fn kind(&self) -> ArtifactKind;

    /// Bincode encoding of the untagged inner value.
    fn encode_payload(&self) -> Result<Vec<u8>>;

    /// Decodes a payload written for `kind`.
    fn decode_payload(kind: ArtifactKind, payload: &[u8]) -> Result<Self>;
}

fn wrong_kind(role: &str, kind: ArtifactKind) -> SpamSiftError {
    SpamSiftError::InvalidArtifact(format!("expected a {} artifact, found {}", role, kind))
}

/// Vectorizer artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VectorizerArtifact {
    /// Vocabulary count vectorizer.
    Count(CountVectorizerParams),
}

impl VectorizerArtifact {
    /// Builds the runtime vectorizer.
    pub fn into_vectorizer(self) -> Result<Box<dyn Vectorizer>> {
        match self {
            VectorizerArtifact::Count(params) => Ok(Box::new(CountVectorizer::new(params)?)),
        }
    }
}

impl From<&CountVectorizer> for VectorizerArtifact {
    fn from(vectorizer: &CountVectorizer) -> Self {
        VectorizerArtifact::Count(vectorizer.params().clone())
    }
}

impl Artifact for VectorizerArtifact {
    const ROLE: &'static str = "vectorizer";

    fn kind(&self) -> ArtifactKind {
        match self {
            VectorizerArtifact::Count(_) => ArtifactKind::Count,
        }
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        match self {
            VectorizerArtifact::Count(params) => Ok(bincode::serialize(params)?),
        }
    }

    fn decode_payload(kind: ArtifactKind, payload: &[u8]) -> Result<Self> {
        match kind {
            ArtifactKind::Count => Ok(VectorizerArtifact::Count(bincode::deserialize(payload)?)),
            other => Err(wrong_kind(Self::ROLE, other)),
        }
    }
}

/// Feature selector artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorArtifact {
    /// Support-mask selector.
    Support(SupportSelector),
}

impl SelectorArtifact {
    /// Validates and builds the runtime selector.
    pub fn into_selector(self) -> Result<Box<dyn FeatureSelector>> {
        match self {
            SelectorArtifact::Support(selector) => {
                selector.validate()?;
                Ok(Box::new(selector))
            }
        }
    }
}

impl Artifact for SelectorArtifact {
    const ROLE: &'static str = "selector";

    fn kind(&self) -> ArtifactKind {
        match self {
            SelectorArtifact::Support(_) => ArtifactKind::Support,
        }
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        match self {
            SelectorArtifact::Support(selector) => Ok(bincode::serialize(selector)?),
        }
    }

    fn decode_payload(kind: ArtifactKind, payload: &[u8]) -> Result<Self> {
        match kind {
            ArtifactKind::Support => Ok(SelectorArtifact::Support(bincode::deserialize(payload)?)),
            other => Err(wrong_kind(Self::ROLE, other)),
        }
    }
}

/// Classifier artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    /// Multinomial naive Bayes.
    MultinomialNb(MultinomialNb),
    /// Linear decision function.
    Linear(LinearModel),
}

impl ClassifierArtifact {
    /// Validates and builds the runtime classifier.
    pub fn into_classifier(self) -> Result<Box<dyn Classifier>> {
        match self {
            ClassifierArtifact::MultinomialNb(model) => {
                model.validate()?;
                Ok(Box::new(model))
            }
            ClassifierArtifact::Linear(model) => Ok(Box::new(model)),
        }
    }
}

impl Artifact for ClassifierArtifact {
    const ROLE: &'static str = "classifier";

    fn kind(&self) -> ArtifactKind {
        match self {
            ClassifierArtifact::MultinomialNb(_) => ArtifactKind::MultinomialNb,
            ClassifierArtifact::Linear(_) => ArtifactKind::Linear,
        }
    }

    fn encode_payload(&self) -> Result<Vec<u8>> {
        Ok(match self {
            ClassifierArtifact::MultinomialNb(model) => bincode::serialize(model)?,
            ClassifierArtifact::Linear(model) => bincode::serialize(model)?,
        })
    }

    fn decode_payload(kind: ArtifactKind, payload: &[u8]) -> Result<Self> {
        match kind {
            ArtifactKind::MultinomialNb => Ok(ClassifierArtifact::MultinomialNb(
                bincode::deserialize(payload)?,
            )),
            ArtifactKind::Linear => Ok(ClassifierArtifact::Linear(bincode::deserialize(payload)?)),
            other => Err(wrong_kind(Self::ROLE, other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_kind_tag() {
        let artifact = SelectorArtifact::Support(SupportSelector::new(4, vec![0, 2]).unwrap());
        let json = serde_json::to_value(&artifact).unwrap();
        assert_eq!(json["kind"], "support");
        assert_eq!(json["n_features_in"], 4);
        assert_eq!(json["support"], serde_json::json!([0, 2]));
    }

    #[test]
    fn test_classifier_from_json() {
        let json = r#"{"kind":"linear","classes":[0,1],"coef":[1.0,-1.0],"intercept":0.0}"#;
        let artifact: ClassifierArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(artifact.kind(), ArtifactKind::Linear);
        let classifier = artifact.into_classifier().unwrap();
        assert_eq!(classifier.n_features(), 2);
        assert_eq!(classifier.kind(), "linear");
    }

    #[test]
    fn test_vectorizer_json_defaults() {
        let json = r#"{"kind":"count","vocabulary":{"free":0,"prize":1}}"#;
        let artifact: VectorizerArtifact = serde_json::from_str(json).unwrap();
        let vectorizer = artifact.into_vectorizer().unwrap();
        assert_eq!(vectorizer.n_features(), 2);
        assert_eq!(vectorizer.transform("free prize").unwrap().nnz(), 2);
    }

    #[test]
    fn test_invalid_content_rejected_on_build() {
        let json = r#"{"kind":"support","n_features_in":2,"support":[1,0]}"#;
        let artifact: SelectorArtifact = serde_json::from_str(json).unwrap();
        assert!(matches!(artifact.into_selector(), Err(SpamSiftError::InvalidArtifact(_))));

        let json = r#"{"kind":"multinomial_nb","classes":[0,1],"class_log_prior":[0.0],"feature_log_prob":[[0.0]]}"#;
        let artifact: ClassifierArtifact = serde_json::from_str(json).unwrap();
        assert!(artifact.into_classifier().is_err());
    }

    #[test]
    fn test_payload_kind_mismatch() {
        let payload = bincode::serialize(&SupportSelector::new(1, vec![0]).unwrap()).unwrap();
        assert!(VectorizerArtifact::decode_payload(ArtifactKind::Support, &payload).is_err());
        assert!(SelectorArtifact::decode_payload(ArtifactKind::Support, &payload).is_ok());
    }
}
