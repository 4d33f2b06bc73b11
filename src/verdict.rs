//! Classification outcome.

use crate::error::SpamSiftError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary outcome of classifying one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Class label 1.
    Spam,
    /// Class label 0.
    NotSpam,
}

impl Verdict {
    /// Returns true for [`Verdict::Spam`].
    pub fn is_spam(self) -> bool {
        self == Verdict::Spam
    }

    /// Wire label: `SPAM` or `NOT_SPAM`.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Spam => "SPAM",
            Verdict::NotSpam => "NOT_SPAM",
        }
    }

    /// Human-readable message for display.
    pub fn message(self) -> &'static str {
        match self {
            Verdict::Spam => "SPAM Message Detected!",
            Verdict::NotSpam => "Legitimate Message (NOT SPAM)",
        }
    }
}

impl TryFrom<i64> for Verdict {
    type Error = SpamSiftError;

    fn try_from(label: i64) -> Result<Self, Self::Error> {
        match label {
            1 => Ok(Verdict::Spam),
            0 => Ok(Verdict::NotSpam),
            other => Err(SpamSiftError::UnknownLabel(other)),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-facing prediction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    /// The verdict.
    pub verdict: Verdict,
}

impl From<Verdict> for Prediction {
    fn from(verdict: Verdict) -> Self {
        Self { verdict }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Verdict::try_from(1).unwrap(), Verdict::Spam);
        assert_eq!(Verdict::try_from(0).unwrap(), Verdict::NotSpam);
        assert!(matches!(Verdict::try_from(2), Err(SpamSiftError::UnknownLabel(2))));
    }

    #[test]
    fn test_prediction_json() {
        let json = serde_json::to_string(&Prediction::from(Verdict::NotSpam)).unwrap();
        assert_eq!(json, r#"{"verdict":"NOT_SPAM"}"#);
        let back: Prediction = serde_json::from_str(r#"{"verdict":"SPAM"}"#).unwrap();
        assert!(back.verdict.is_spam());
    }

    #[test]
    fn test_display() {
        assert_eq!(Verdict::Spam.to_string(), "SPAM");
        assert_eq!(Verdict::NotSpam.message(), "Legitimate Message (NOT SPAM)");
    }
}
