//! Treebank-compatible word tokenization.
//!
//! The vocabulary of the trained vectorizer was built from tokens produced
//! by the Penn Treebank substitution rules (as refined by NLTK's word
//! tokenizer), applied sentence by sentence. Those rules are reproduced here
//! so that serving-time tokens match training-time tokens: punctuation is
//! split off words, clitics (`n't`, `'s`, `'ll`, ...) become separate tokens,
//! and a handful of fused contractions are cut in two.

use crate::text::sentence::split_sentences;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

type Rules = Vec<(Regex, &'static str)>;

fn compile(table: &[(&str, &'static str)]) -> Rules {
    table
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), *replacement))
        .collect()
}

static STARTING_QUOTES: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        (r"([«“‘„]|[`]+)", " $1 "),
        (r#"^""#, "``"),
        (r"(``)", " $1 "),
        (r#"([ (\[{<])("|'{2})"#, "$1 `` "),
    ])
});

/// A quote glued to a one-letter word (`'a`), except clitic letters.
static QUOTED_LETTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(')(\w)\b").unwrap());

static PUNCTUATION: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2 $3 "),
        (r"([:,])([^\d])", " $1 $2"),
        (r"([:,])$", " $1 "),
        (r"\.{2,}", " $0 "),
        (r"[;@#$%&]", " $0 "),
        (r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2$3 "),
        (r"[?!]", " $0 "),
        (r"([^'])' ", "$1 ' "),
        (r"[*]", " $0 "),
    ])
});

static PARENS_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\]\[(){}<>]").unwrap());

static DOUBLE_DASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"--").unwrap());

static ENDING_QUOTES: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        (r"([»”’])", " $1 "),
        (r"''", " '' "),
        (r#"""#, " '' "),
        (r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        (r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ])
});

static CONTRACTIONS: Lazy<Rules> = Lazy::new(|| {
    compile(&[
        (r"(?i)\b(can)(not)\b", " $1 $2 "),
        (r"(?i)\b(d)('ye)\b", " $1 $2 "),
        (r"(?i)\b(gim)(me)\b", " $1 $2 "),
        (r"(?i)\b(gon)(na)\b", " $1 $2 "),
        (r"(?i)\b(got)(ta)\b", " $1 $2 "),
        (r"(?i)\b(lem)(me)\b", " $1 $2 "),
        (r"(?i)\b(more)('n)\b", " $1 $2 "),
        (r"(?i)\b(wan)(na)\s", " $1 $2 "),
        (r"(?i) ('t)(is)\b", " $1 $2 "),
        (r"(?i) ('t)(was)\b", " $1 $2 "),
    ])
});

fn apply(rules: &Rules, text: String) -> String {
    rules
        .iter()
        .fold(text, |acc, (re, replacement)| re.replace_all(&acc, *replacement).into_owned())
}

/// Word tokenizer producing Treebank-style tokens.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    split_sentences: bool,
}

impl WordTokenizer {
    /// Creates a tokenizer. With `split_sentences`, the text is segmented
    /// first and every sentence is tokenized on its own.
    pub fn new(split_sentences: bool) -> Self {
        Self { split_sentences }
    }

    /// Tokenizes text into word-level tokens, preserving order.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        if self.split_sentences {
            split_sentences(text)
                .into_iter()
                .flat_map(tokenize_sentence)
                .collect()
        } else {
            tokenize_sentence(text)
        }
    }
}

impl Default for WordTokenizer {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Tokenizes a single sentence.
///
/// A period is split off only when it ends the sentence.
pub fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let mut text = apply(&STARTING_QUOTES, sentence.to_string());
    text = QUOTED_LETTER
        .replace_all(&text, |caps: &Captures| {
            let letter = &caps[2];
            if matches!(letter.to_ascii_lowercase().as_str(), "m" | "t" | "s" | "d" | "n") {
                caps[0].to_string()
            } else {
                format!("{} {}", &caps[1], letter)
            }
        })
        .into_owned();

    text = apply(&PUNCTUATION, text);
    text = PARENS_BRACKETS.replace_all(&text, " $0 ").into_owned();
    text = DOUBLE_DASHES.replace_all(&text, " -- ").into_owned();

    let mut text = format!(" {} ", text);
    text = apply(&ENDING_QUOTES, text);
    text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}
