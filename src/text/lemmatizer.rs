//! Dictionary-based noun lemmatization.
//!
//! Implements WordNet's morphological reduction ("morphy") for nouns:
//! irregular forms are looked up in the exception list, regular forms are
//! reduced by suffix detachment rules until a candidate is a known noun
//! lemma. When several candidates are known, the shortest wins; words with
//! no known candidate pass through unchanged.

use crate::error::{Result, SpamSiftError};
use log::info;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Noun suffix detachment rules, tried in this order.
const NOUN_SUBSTITUTIONS: [(&str, &str); 9] = [
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

/// WordNet noun index file name.
pub const NOUN_INDEX: &str = "index.noun";

/// WordNet noun exception file name.
pub const NOUN_EXCEPTIONS: &str = "noun.exc";

/// Context-free noun lemmatizer backed by a lemma dictionary.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    lemmas: HashSet<String>,
    exceptions: HashMap<String, Vec<String>>,
}

impl Lemmatizer {
    /// Creates a lemmatizer from known noun lemmas and an exception map
    /// (inflected form to base forms).
    pub fn new(lemmas: HashSet<String>, exceptions: HashMap<String, Vec<String>>) -> Self {
        Self { lemmas, exceptions }
    }

    /// Convenience constructor from borrowed entries.
    pub fn from_entries<'a, L, E>(lemmas: L, exceptions: E) -> Self
    where
        L: IntoIterator<Item = &'a str>,
        E: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        Self::new(
            lemmas.into_iter().map(str::to_string).collect(),
            exceptions
                .into_iter()
                .map(|(form, bases)| {
                    (form.to_string(), bases.iter().map(|b| b.to_string()).collect())
                })
                .collect(),
        )
    }

    /// Loads `index.noun` and `noun.exc` from a WordNet dictionary directory.
    pub fn from_wordnet_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let index = read_resource(&dir.join(NOUN_INDEX))?;
        let exceptions = read_resource(&dir.join(NOUN_EXCEPTIONS))?;

        let lemmatizer = Self::new(parse_index(&index), parse_exceptions(&exceptions));
        if lemmatizer.lemmas.is_empty() {
            return Err(SpamSiftError::ResourceMissing(format!(
                "{}: no noun lemmas found",
                dir.join(NOUN_INDEX).display()
            )));
        }

        info!(
            "Loaded WordNet nouns from {}: {} lemmas, {} exceptions",
            dir.display(),
            lemmatizer.lemmas.len(),
            lemmatizer.exceptions.len()
        );
        Ok(lemmatizer)
    }

    /// Number of known lemmas.
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    /// Returns true if no lemmas are known.
    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Returns true if `word` is a known noun lemma.
    pub fn is_lemma(&self, word: &str) -> bool {
        self.lemmas.contains(word)
    }

    /// Reduces a token to its base form.
    pub fn lemmatize(&self, word: &str) -> String {
        self.candidates(word)
            .into_iter()
            .min_by_key(|c| c.chars().count())
            .unwrap_or_else(|| word.to_string())
    }

    /// All known base forms of `word`, in discovery order.
    pub fn candidates(&self, word: &str) -> Vec<String> {
        if let Some(bases) = self.exceptions.get(word) {
            let forms = std::iter::once(word.to_string()).chain(bases.iter().cloned());
            return self.known(forms);
        }

        let mut forms = detach(&[word.to_string()]);
        let found = self.known(std::iter::once(word.to_string()).chain(forms.iter().cloned()));
        if !found.is_empty() {
            return found;
        }

        while !forms.is_empty() {
            forms = detach(&forms);
            let found = self.known(forms.iter().cloned());
            if !found.is_empty() {
                return found;
            }
        }

        Vec::new()
    }

    /// Keeps known lemmas, deduplicated, first occurrence first.
    fn known<I: IntoIterator<Item = String>>(&self, forms: I) -> Vec<String> {
        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|f| self.lemmas.contains(f) && seen.insert(f.clone()))
            .collect()
    }
}

/// Applies every matching detachment rule to every form.
fn detach(forms: &[String]) -> Vec<String> {
    forms
        .iter()
        .flat_map(|form| {
            NOUN_SUBSTITUTIONS
                .iter()
                .filter(move |(suffix, _)| form.ends_with(suffix))
                .map(move |(suffix, base)| format!("{}{}", &form[..form.len() - suffix.len()], base))
        })
        .collect()
}

fn read_resource(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| SpamSiftError::ResourceMissing(format!("{}: {}", path.display(), e)))
}

/// Parses a WordNet index file: the first field of every non-header line.
fn parse_index(content: &str) -> HashSet<String> {
    content
        .lines()
        .filter(|line| !line.starts_with(' '))
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

/// Parses a WordNet exception file: `inflected base [base...]` per line.
fn parse_exceptions(content: &str) -> HashMap<String, Vec<String>> {
    content
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let form = fields.next()?;
            let bases: Vec<String> = fields.map(str::to_string).collect();
            (!bases.is_empty()).then(|| (form.to_string(), bases))
        })
        .collect()
}
