//! Lexical filtering of raw tokens.

use crate::config::AlnumPolicy;
use crate::text::stopwords::StopWords;

/// ASCII punctuation, matched as a substring the way the training-time
/// filter did.
const ASCII_PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Drops non-alphanumeric tokens, stopwords and punctuation.
#[derive(Debug, Clone)]
pub struct LexicalFilter {
    alnum: AlnumPolicy,
    stopwords: StopWords,
}

impl LexicalFilter {
    /// Creates a filter.
    pub fn new(alnum: AlnumPolicy, stopwords: StopWords) -> Self {
        Self { alnum, stopwords }
    }

    /// Returns the stopword set.
    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// Returns true if every character of a non-empty token is alphanumeric.
    pub fn is_alphanumeric(&self, token: &str) -> bool {
        !token.is_empty() && token.chars().all(|c| self.alnum.accepts(c))
    }

    /// Keeps tokens made entirely of alphanumeric characters; mixed tokens
    /// are discarded, not trimmed.
    pub fn keep_alphanumeric(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| self.is_alphanumeric(t))
            .collect()
    }

    /// Drops stopwords and punctuation.
    pub fn drop_stopwords(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
            .into_iter()
            .filter(|t| !self.stopwords.contains(t) && !is_punctuation(t))
            .collect()
    }

    /// Both filtering stages, in order.
    pub fn apply(&self, tokens: Vec<String>) -> Vec<String> {
        self.drop_stopwords(self.keep_alphanumeric(tokens))
    }
}

fn is_punctuation(token: &str) -> bool {
    !token.is_empty() && ASCII_PUNCTUATION.contains(token)
}
