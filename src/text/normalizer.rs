//! Text normalization: raw message to canonical token string.

use crate::config::{LinguisticConfig, TextConfig, UnicodeForm};
use crate::error::{Result, SpamSiftError};
use crate::text::filter::LexicalFilter;
use crate::text::lemmatizer::Lemmatizer;
use crate::text::stopwords::StopWords;
use crate::text::tokenizer::WordTokenizer;
use log::{debug, info};
use serde::Serialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Lemmatized, filtered tokens joined by single ASCII spaces.
///
/// This is the exact string handed to the vectorizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    /// Joins tokens with a single space.
    pub fn from_tokens(tokens: &[String]) -> Self {
        Self(tokens.join(" "))
    }

    /// The text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if nothing survived normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the tokens.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.split(' ').filter(|t| !t.is_empty())
    }

    /// Consumes the value, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Every intermediate stage of one normalization, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizationTrace {
    /// Input after Unicode normalization and lowercasing.
    pub prepared: String,
    /// Word tokens.
    pub tokens: Vec<String>,
    /// Tokens surviving the alphanumeric filter.
    pub alphanumeric: Vec<String>,
    /// Tokens surviving the stopword and punctuation filter.
    pub content: Vec<String>,
    /// Lemmatized tokens.
    pub lemmas: Vec<String>,
    /// Final output.
    pub normalized: NormalizedText,
}

/// Deterministic text normalizer.
///
/// Stages run in a fixed order: lowercase, tokenize, alphanumeric filter,
/// stopword filter, lemmatize, join. Each stage maps one token sequence to
/// the next without shared state, so a `Normalizer` can be shared freely
/// across threads.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: TextConfig,
    tokenizer: WordTokenizer,
    filter: LexicalFilter,
    lemmatizer: Option<Lemmatizer>,
}

impl Normalizer {
    /// Creates a normalizer from loaded resources.
    ///
    /// Fails with `ResourceMissing` if lemmatization is enabled and no
    /// lemmatizer is supplied.
    pub fn new(
        config: TextConfig,
        stopwords: StopWords,
        lemmatizer: Option<Lemmatizer>,
    ) -> Result<Self> {
        if config.lemmatize && lemmatizer.is_none() {
            return Err(SpamSiftError::ResourceMissing(
                "lemmatization enabled but no lemma dictionary provided".to_string(),
            ));
        }

        Ok(Self {
            tokenizer: WordTokenizer::new(config.split_sentences),
            filter: LexicalFilter::new(config.alnum, stopwords),
            lemmatizer: if config.lemmatize { lemmatizer } else { None },
            config,
        })
    }

    /// Loads linguistic resources and builds the normalizer.
    pub fn from_config(text: &TextConfig, resources: &LinguisticConfig) -> Result<Self> {
        let stopwords = match &resources.stopwords {
            Some(path) => StopWords::from_file(path)?,
            None => StopWords::english(),
        };

        let lemmatizer = if text.lemmatize {
            let dir = resources.wordnet.as_ref().ok_or_else(|| {
                SpamSiftError::ResourceMissing("resources.wordnet is not configured".to_string())
            })?;
            Some(Lemmatizer::from_wordnet_dir(dir)?)
        } else {
            None
        };

        info!(
            "Normalizer ready: {} stopwords, lemmatization {}",
            stopwords.len(),
            if lemmatizer.is_some() { "on" } else { "off" }
        );
        Self::new(text.clone(), stopwords, lemmatizer)
    }

    /// Returns the text configuration.
    pub fn config(&self) -> &TextConfig {
        &self.config
    }

    /// Returns the lexical filter.
    pub fn filter(&self) -> &LexicalFilter {
        &self.filter
    }

    /// Normalizes raw text.
    pub fn normalize(&self, raw: &str) -> NormalizedText {
        let normalized = NormalizedText::from_tokens(&self.tokens(raw));
        debug!("normalized {} bytes into {} bytes", raw.len(), normalized.as_str().len());
        normalized
    }

    /// The canonical tokens, before joining.
    pub fn tokens(&self, raw: &str) -> Vec<String> {
        let tokens = self.tokenizer.tokenize(&self.prepare(raw));
        let content = self.filter.apply(tokens);
        self.lemmatize(content)
    }

    /// Normalizes raw text, keeping every intermediate stage.
    pub fn trace(&self, raw: &str) -> NormalizationTrace {
        let prepared = self.prepare(raw);
        let tokens = self.tokenizer.tokenize(&prepared);
        let alphanumeric = self.filter.keep_alphanumeric(tokens.clone());
        let content = self.filter.drop_stopwords(alphanumeric.clone());
        let lemmas = self.lemmatize(content.clone());
        let normalized = NormalizedText::from_tokens(&lemmas);

        NormalizationTrace {
            prepared,
            tokens,
            alphanumeric,
            content,
            lemmas,
            normalized,
        }
    }

    fn prepare(&self, raw: &str) -> String {
        let text: String = match self.config.unicode_form {
            UnicodeForm::None => raw.to_string(),
            UnicodeForm::Nfc => raw.nfc().collect(),
            UnicodeForm::Nfkc => raw.nfkc().collect(),
        };

        if self.config.lowercase {
            text.to_lowercase()
        } else {
            text
        }
    }

    fn lemmatize(&self, tokens: Vec<String>) -> Vec<String> {
        match &self.lemmatizer {
            Some(lemmatizer) => tokens.iter().map(|t| lemmatizer.lemmatize(t)).collect(),
            None => tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AlnumPolicy;

    fn lemmatizer() -> Lemmatizer {
        Lemmatizer::from_entries(
            [
                "congratulation", "free", "click", "claim", "prize", "hey", "still", "meeting",
                "lunch", "tomorrow", "noon", "hello", "world", "offer", "cash", "wa", "snack", "he",
            ],
            [],
        )
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(TextConfig::default(), StopWords::english(), Some(lemmatizer())).unwrap()
    }

    #[test]
    fn test_spam_message() {
        let text = normalizer().normalize(
            "Congratulations! You have WON a FREE iPhone, click here to claim your prize!!!",
        );
        assert_eq!(text.as_str(), "congratulation free iphone click claim prize");
    }

    #[test]
    fn test_ham_message() {
        let text = normalizer().normalize("Hey, are we still meeting for lunch tomorrow at noon?");
        assert_eq!(text.as_str(), "hey still meeting lunch tomorrow noon");
    }

    #[test]
    fn test_punctuation_stripping() {
        let n = normalizer();
        assert_eq!(n.normalize("Hello!!! World???"), n.normalize("Hello World"));
        assert_eq!(n.normalize("Hello World").as_str(), "hello world");
    }

    #[test]
    fn test_only_stopwords() {
        assert!(normalizer().normalize("the a an is of").is_empty());
        assert!(normalizer().normalize("!!! ... ???").is_empty());
    }

    #[test]
    fn test_empty_input() {
        let text = normalizer().normalize("");
        assert!(text.is_empty());
        assert_eq!(text.tokens().count(), 0);
    }

    #[test]
    fn test_emoji_and_mixed_tokens_dropped() {
        let text = normalizer().normalize("Free cash 🎉🎉 at www.win.com e-mail now");
        assert_eq!(text.as_str(), "free cash");
    }

    #[test]
    fn test_sentence_final_period_detaches() {
        let n = normalizer();
        assert_eq!(n.normalize("Great offers. Claim now").as_str(), "great offer claim");
        // Glued periods inside a sentence make the whole token non-alphanumeric.
        assert_eq!(n.normalize("Great offers.Claim now").as_str(), "great");
    }

    #[test]
    fn test_number_period_mid_message() {
        let n = normalizer();
        // The period stays on "5." so the whole token is dropped.
        assert_eq!(n.normalize("Call me at 5. Bring snacks").as_str(), "call bring snack");
        // At the end of the message it ends the sentence and detaches.
        assert_eq!(n.normalize("Call me at 5.").as_str(), "call 5");
    }

    #[test]
    fn test_lemma_can_be_a_stopword() {
        let n = normalizer();
        // Stopwords are removed before lemmatization, so a lemma may itself
        // be a stopword and normalization is not always a fixed point.
        let once = n.normalize("hes");
        assert_eq!(once.as_str(), "he");
        assert!(n.normalize(once.as_str()).is_empty());
    }

    #[test]
    fn test_lemmatization_disabled() {
        let config = TextConfig {
            lemmatize: false,
            ..Default::default()
        };
        let n = Normalizer::new(config, StopWords::english(), None).unwrap();
        assert_eq!(n.normalize("Free prizes!").as_str(), "free prizes");
    }

    #[test]
    fn test_missing_lemmatizer_is_fatal() {
        let result = Normalizer::new(TextConfig::default(), StopWords::english(), None);
        assert!(matches!(result, Err(SpamSiftError::ResourceMissing(_))));
    }

    #[test]
    fn test_unicode_forms() {
        let config = TextConfig {
            unicode_form: UnicodeForm::Nfc,
            ..Default::default()
        };
        let n = Normalizer::new(config, StopWords::english(), Some(lemmatizer())).unwrap();
        // "e" followed by a combining acute accent composes into one letter.
        assert_eq!(n.normalize("Cafe\u{0301}").as_str(), "caf\u{00e9}");

        let config = TextConfig {
            unicode_form: UnicodeForm::Nfkc,
            ..Default::default()
        };
        let n = Normalizer::new(config, StopWords::english(), Some(lemmatizer())).unwrap();
        assert_eq!(n.normalize("\u{FF26}\u{FF32}\u{FF25}\u{FF25}").as_str(), "free");
    }

    #[test]
    fn test_ascii_alnum_policy() {
        let config = TextConfig {
            alnum: AlnumPolicy::Ascii,
            ..Default::default()
        };
        let n = Normalizer::new(config, StopWords::english(), Some(lemmatizer())).unwrap();
        assert_eq!(n.normalize("free café").as_str(), "free");
    }

    #[test]
    fn test_trace_stages() {
        let trace = normalizer().trace("You WON cash prizes!");
        assert_eq!(trace.prepared, "you won cash prizes!");
        assert_eq!(trace.tokens, vec!["you", "won", "cash", "prizes", "!"]);
        assert_eq!(trace.alphanumeric, vec!["you", "won", "cash", "prizes"]);
        assert_eq!(trace.content, vec!["cash", "prizes"]);
        assert_eq!(trace.lemmas, vec!["cash", "prize"]);
        assert_eq!(trace.normalized.as_str(), "cash prize");
    }
}
