//! Bag-of-words count vectorizer over a fixed vocabulary.

use crate::error::{Result, SpamSiftError};
use crate::model::{FeatureVector, Vectorizer};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default token pattern: runs of two or more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Exported parameters of a trained count vectorizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizerParams {
    /// Term to column index. Indices cover `0..vocabulary.len()` exactly.
    pub vocabulary: HashMap<String, usize>,

    /// Lowercase documents before matching.
    #[serde(default = "default_true")]
    pub lowercase: bool,

    /// Regex selecting tokens.
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,

    /// Inclusive n-gram range.
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),

    /// Emit 1.0 for present terms instead of counts.
    #[serde(default)]
    pub binary: bool,
}

impl CountVectorizerParams {
    /// Parameters with defaults for everything but the vocabulary.
    pub fn with_vocabulary(vocabulary: HashMap<String, usize>) -> Self {
        Self {
            vocabulary,
            lowercase: true,
            token_pattern: default_token_pattern(),
            ngram_range: default_ngram_range(),
            binary: false,
        }
    }
}

/// Count vectorizer ready for transforms.
#[derive(Debug, Clone)]
pub struct CountVectorizer {
    params: CountVectorizerParams,
    pattern: Regex,
}

impl CountVectorizer {
    /// Validates parameters and compiles the token pattern.
    pub fn new(params: CountVectorizerParams) -> Result<Self> {
        let pattern = Regex::new(&params.token_pattern).map_err(|e| {
            SpamSiftError::InvalidArtifact(format!("token pattern {:?}: {}", params.token_pattern, e))
        })?;

        let (min_n, max_n) = params.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(SpamSiftError::InvalidArtifact(format!(
                "invalid ngram range ({}, {})",
                min_n, max_n
            )));
        }

        let n = params.vocabulary.len();
        let mut seen = vec![false; n];
        for (term, &index) in &params.vocabulary {
            if index >= n || std::mem::replace(&mut seen[index], true) {
                return Err(SpamSiftError::InvalidArtifact(format!(
                    "vocabulary index {} for {:?} is out of range or duplicated",
                    index, term
                )));
            }
        }

        Ok(Self { params, pattern })
    }

    /// Builds a vectorizer from a term list; column `i` is `terms[i]`.
    pub fn from_terms<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.into(), i))
            .collect();
        Self::new(CountVectorizerParams::with_vocabulary(vocabulary))
    }

    /// Returns the exported parameters.
    pub fn params(&self) -> &CountVectorizerParams {
        &self.params
    }

    /// Column of `term`, if it is in the vocabulary.
    pub fn column(&self, term: &str) -> Option<usize> {
        self.params.vocabulary.get(term).copied()
    }

    /// Splits a document into the terms looked up in the vocabulary.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let doc = if self.params.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let tokens: Vec<&str> = self.pattern.find_iter(&doc).map(|m| m.as_str()).collect();
        let (min_n, max_n) = self.params.ngram_range;

        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }
}

impl Vectorizer for CountVectorizer {
    fn transform(&self, text: &str) -> Result<FeatureVector> {
        let entries = self
            .analyze(text)
            .iter()
            .filter_map(|term| self.column(term))
            .map(|col| (col, 1.0))
            .collect();

        let mut features = FeatureVector::from_entries(self.n_features(), entries)?;
        if self.params.binary {
            features = FeatureVector::from_entries(
                self.n_features(),
                features.iter().map(|(col, _)| (col, 1.0)).collect(),
            )?;
        }
        Ok(features)
    }

    fn n_features(&self) -> usize {
        self.params.vocabulary.len()
    }

    fn kind(&self) -> &'static str {
        "count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vectorizer() -> CountVectorizer {
        CountVectorizer::from_terms(["claim", "free", "lunch", "prize", "win"]).unwrap()
    }

    #[test]
    fn test_transform_counts() {
        let v = vectorizer();
        let fv = v.transform("free prize free win").unwrap();
        assert_eq!(fv.dim(), 5);
        assert_eq!(fv.get(1), 2.0);
        assert_eq!(fv.get(3), 1.0);
        assert_eq!(fv.get(4), 1.0);
        assert_eq!(fv.get(2), 0.0);
    }

    #[test]
    fn test_unknown_terms_ignored() {
        let fv = vectorizer().transform("iphone click here").unwrap();
        assert!(fv.is_zero());
        assert_eq!(fv.dim(), 5);
    }

    #[test]
    fn test_empty_document() {
        let fv = vectorizer().transform("").unwrap();
        assert!(fv.is_zero());
    }

    #[test]
    fn test_single_character_tokens_skipped() {
        let v = CountVectorizer::from_terms(["u", "win"]).unwrap();
        let fv = v.transform("u win").unwrap();
        assert_eq!(fv.get(0), 0.0);
        assert_eq!(fv.get(1), 1.0);
    }

    #[test]
    fn test_binary() {
        let mut params = vectorizer().params().clone();
        params.binary = true;
        let v = CountVectorizer::new(params).unwrap();
        assert_eq!(v.transform("free free free").unwrap().get(1), 1.0);
    }

    #[test]
    fn test_bigrams() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("free".to_string(), 0);
        vocabulary.insert("free prize".to_string(), 1);
        vocabulary.insert("prize".to_string(), 2);
        let params = CountVectorizerParams {
            ngram_range: (1, 2),
            ..CountVectorizerParams::with_vocabulary(vocabulary)
        };
        let v = CountVectorizer::new(params).unwrap();

        assert_eq!(v.analyze("free prize now"), vec!["free", "prize", "now", "free prize", "prize now"]);
        let fv = v.transform("free prize").unwrap();
        assert_eq!(fv.iter().collect::<Vec<_>>(), vec![(0, 1.0), (1, 1.0), (2, 1.0)]);
    }

    #[test]
    fn test_invalid_vocabulary() {
        let mut vocabulary = HashMap::new();
        vocabulary.insert("a".to_string(), 0);
        vocabulary.insert("b".to_string(), 0);
        let result = CountVectorizer::new(CountVectorizerParams::with_vocabulary(vocabulary));
        assert!(matches!(result, Err(SpamSiftError::InvalidArtifact(_))));
    }

    #[test]
    fn test_invalid_pattern() {
        let mut params = vectorizer().params().clone();
        params.token_pattern = "(".to_string();
        assert!(matches!(CountVectorizer::new(params), Err(SpamSiftError::InvalidArtifact(_))));
    }
}
