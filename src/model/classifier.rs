//! Trained binary classifiers.

use crate::error::{Result, SpamSiftError};
use crate::model::{Classifier, FeatureVector};
use serde::{Deserialize, Serialize};

/// Multinomial naive Bayes over count features.
///
/// Predicts the class maximizing `log P(c) + sum_j x_j * log P(j | c)`;
/// the first class wins ties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultinomialNb {
    classes: Vec<i64>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Creates a model; one prior and one log-probability row per class.
    pub fn new(
        classes: Vec<i64>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let model = Self {
            classes,
            class_log_prior,
            feature_log_prob,
        };
        model.validate()?;
        Ok(model)
    }

    /// Re-checks shape invariants; used after deserialization.
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(SpamSiftError::InvalidArtifact(format!(
                "naive Bayes needs at least two classes, got {}",
                n_classes
            )));
        }
        if self.class_log_prior.len() != n_classes || self.feature_log_prob.len() != n_classes {
            return Err(SpamSiftError::InvalidArtifact(
                "naive Bayes priors and rows must match the class count".to_string(),
            ));
        }
        let width = self.feature_log_prob[0].len();
        if self.feature_log_prob.iter().any(|row| row.len() != width) {
            return Err(SpamSiftError::InvalidArtifact(
                "naive Bayes feature rows have different widths".to_string(),
            ));
        }
        Ok(())
    }

    /// Class labels in column order.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    /// Joint log-likelihood of each class.
    pub fn joint_log_likelihood(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        features.expect_dim("classifier", self.n_features())?;
        Ok(self
            .class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| prior + features.dot(row))
            .collect())
    }
}

impl Classifier for MultinomialNb {
    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let jll = self.joint_log_likelihood(features)?;
        let best = jll
            .iter()
            .enumerate()
            .fold(0, |best, (i, &score)| if score > jll[best] { i } else { best });
        Ok(self.classes[best])
    }

    fn n_features(&self) -> usize {
        self.feature_log_prob[0].len()
    }

    fn kind(&self) -> &'static str {
        "multinomial_nb"
    }
}

/// Linear decision function `w . x + b` (logistic regression, linear SVM).
///
/// Predicts `classes[1]` when the score is strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    classes: [i64; 2],
    coef: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Creates a model.
    pub fn new(classes: [i64; 2], coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            classes,
            coef,
            intercept,
        }
    }

    /// Signed distance to the decision boundary.
    pub fn decision_function(&self, features: &FeatureVector) -> Result<f64> {
        features.expect_dim("classifier", self.coef.len())?;
        Ok(features.dot(&self.coef) + self.intercept)
    }
}

impl Classifier for LinearModel {
    fn predict(&self, features: &FeatureVector) -> Result<i64> {
        let score = self.decision_function(features)?;
        Ok(if score > 0.0 { self.classes[1] } else { self.classes[0] })
    }

    fn n_features(&self) -> usize {
        self.coef.len()
    }

    fn kind(&self) -> &'static str {
        "linear"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_bayes() -> MultinomialNb {
        // Column 0 is a ham word, column 1 a spam word.
        MultinomialNb::new(
            vec![0, 1],
            vec![(0.85f64).ln(), (0.15f64).ln()],
            vec![
                vec![(0.9f64).ln(), (0.1f64).ln()],
                vec![(0.1f64).ln(), (0.9f64).ln()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_naive_bayes_predict() {
        let nb = naive_bayes();
        let spam = FeatureVector::from_entries(2, vec![(1, 2.0)]).unwrap();
        let ham = FeatureVector::from_entries(2, vec![(0, 1.0)]).unwrap();
        assert_eq!(nb.predict(&spam).unwrap(), 1);
        assert_eq!(nb.predict(&ham).unwrap(), 0);
        // Empty row falls back to the prior.
        assert_eq!(nb.predict(&FeatureVector::zeros(2)).unwrap(), 0);
    }

    #[test]
    fn test_naive_bayes_dimension_mismatch() {
        let result = naive_bayes().predict(&FeatureVector::zeros(3));
        assert!(matches!(
            result,
            Err(SpamSiftError::DimensionMismatch { stage: "classifier", expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_naive_bayes_invalid_shapes() {
        assert!(MultinomialNb::new(vec![0], vec![0.0], vec![vec![0.0]]).is_err());
        assert!(MultinomialNb::new(vec![0, 1], vec![0.0], vec![vec![0.0], vec![0.0]]).is_err());
        assert!(MultinomialNb::new(vec![0, 1], vec![0.0, 0.0], vec![vec![0.0], vec![0.0, 1.0]]).is_err());
    }

    #[test]
    fn test_linear_predict() {
        let model = LinearModel::new([0, 1], vec![-1.0, 2.0], -0.5);
        let spam = FeatureVector::from_entries(2, vec![(1, 1.0)]).unwrap();
        let ham = FeatureVector::from_entries(2, vec![(0, 1.0), (1, 0.5)]).unwrap();
        assert_eq!(model.predict(&spam).unwrap(), 1);
        assert_eq!(model.predict(&ham).unwrap(), 0);
        assert_eq!(model.predict(&FeatureVector::zeros(2)).unwrap(), 0);
        assert!((model.decision_function(&spam).unwrap() - 1.5).abs() < 1e-12);
    }
}
