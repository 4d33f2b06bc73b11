//! Configuration for the spamsift classifier.

use crate::error::{Result, SpamSiftError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use unicode_general_category::{get_general_category, GeneralCategory};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Text normalization configuration.
    pub text: TextConfig,

    /// Linguistic resource locations.
    pub resources: LinguisticConfig,

    /// Trained artifact locations.
    pub assets: AssetConfig,

    /// Inference policy.
    pub inference: InferenceConfig,
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// Relative resource and asset paths are resolved against the directory
    /// containing the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SpamSiftError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut config: Self = serde_json::from_str(&content)
            .map_err(|e| SpamSiftError::Config(format!("{}: {}", path.display(), e)))?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// Rebases every relative path onto `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        if let Some(p) = self.resources.stopwords.as_mut() {
            rebase(p);
        }
        if let Some(p) = self.resources.wordnet.as_mut() {
            rebase(p);
        }
        rebase(&mut self.assets.vectorizer);
        rebase(&mut self.assets.selector);
        rebase(&mut self.assets.classifier);
    }

    /// Checks values that serde cannot.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("vectorizer", &self.assets.vectorizer),
            ("selector", &self.assets.selector),
            ("classifier", &self.assets.classifier),
        ] {
            if path.as_os_str().is_empty() {
                return Err(SpamSiftError::Config(format!("assets.{} path is empty", name)));
            }
        }
        Ok(())
    }
}

/// Which characters count as alphanumeric in the lexical filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlnumPolicy {
    /// Letters and numbers by general category (`L*` or `N*`). Combining
    /// marks such as Indic vowel signs are rejected.
    #[default]
    Unicode,
    /// `char::is_alphanumeric`, which also accepts `Other_Alphabetic`
    /// combining marks (`Mn`, `Mc`).
    UnicodeAlphabetic,
    /// `[a-z0-9]` only; every non-ASCII token is dropped.
    Ascii,
}

impl AlnumPolicy {
    /// Returns true if `c` is alphanumeric under this policy.
    #[inline]
    pub fn accepts(self, c: char) -> bool {
        match self {
            AlnumPolicy::Unicode => is_letter_or_number(c),
            AlnumPolicy::UnicodeAlphabetic => c.is_alphanumeric(),
            AlnumPolicy::Ascii => c.is_ascii_alphanumeric(),
        }
    }
}

fn is_letter_or_number(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
    )
}

/// Unicode normalization applied before lowercasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnicodeForm {
    /// Leave the input as is.
    #[default]
    None,
    /// Canonical composition.
    Nfc,
    /// Compatibility composition.
    Nfkc,
}

/// Text normalization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Lowercase the input before tokenizing.
    /// Default: true.
    pub lowercase: bool,

    /// Unicode normalization form applied first.
    /// Default: none.
    pub unicode_form: UnicodeForm,

    /// Definition of "alphanumeric" for the token filter.
    /// Default: unicode.
    pub alnum: AlnumPolicy,

    /// Split into sentences before word tokenization, so that
    /// sentence-final periods detach from the preceding word.
    /// Default: true.
    pub split_sentences: bool,

    /// Apply lemmatization.
    /// Default: true.
    pub lemmatize: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            lowercase: true,
            unicode_form: UnicodeForm::None,
            alnum: AlnumPolicy::Unicode,
            split_sentences: true,
            lemmatize: true,
        }
    }
}

/// Linguistic resource configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LinguisticConfig {
    /// Stopword file, one word per line.
    /// Default: None (built-in English list).
    pub stopwords: Option<PathBuf>,

    /// WordNet dictionary directory holding `index.noun` and `noun.exc`.
    /// Required when lemmatization is enabled.
    pub wordnet: Option<PathBuf>,
}

/// Trained artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Vectorizer artifact.
    /// Default: "vectorizer.json".
    pub vectorizer: PathBuf,

    /// Feature selector artifact.
    /// Default: "selector.json".
    pub selector: PathBuf,

    /// Classifier artifact.
    /// Default: "classifier.json".
    pub classifier: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            vectorizer: PathBuf::from("vectorizer.json"),
            selector: PathBuf::from("selector.json"),
            classifier: PathBuf::from("classifier.json"),
        }
    }
}

/// What to do with empty or whitespace-only messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// Answer NOT_SPAM without consulting the model.
    #[default]
    NotSpam,
    /// Run the empty normalized text through the model.
    Model,
    /// Fail with `InvalidInput`.
    Reject,
}

/// Inference configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Empty input handling.
    /// Default: not_spam.
    pub empty_input: EmptyInputPolicy,
}
