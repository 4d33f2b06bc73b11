//! Stopword resource.

use crate::error::{Result, SpamSiftError};
use std::collections::HashSet;
use std::path::Path;

/// Pinned English stopword list (NLTK `stopwords` corpus, 179 entries).
const ENGLISH: &str = include_str!("../../resources/stopwords/english");

/// A fixed set of stopwords, matched exactly against tokens.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in English list.
    pub fn english() -> Self {
        Self::parse(ENGLISH)
    }

    /// Creates a set from explicit words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reads a stopword file with one word per line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamSiftError::ResourceMissing(format!("stopwords {}: {}", path.display(), e))
        })?;
        let stopwords = Self::parse(&content);
        if stopwords.is_empty() {
            return Err(SpamSiftError::ResourceMissing(format!(
                "stopwords {}: file is empty",
                path.display()
            )));
        }
        Ok(stopwords)
    }

    fn parse(content: &str) -> Self {
        Self::from_words(content.lines().map(str::trim).filter(|l| !l.is_empty()))
    }

    /// Returns true if `token` is a stopword.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Number of stopwords.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
