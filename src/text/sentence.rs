//! Sentence boundary detection ahead of word tokenization.
//!
//! Only one thing depends on sentence boundaries downstream: a period that
//! ends a sentence is split off its word, while a period inside a sentence
//! stays attached (and the token is later dropped by the alphanumeric
//! filter). Boundaries are therefore placed the way a trained Punkt model
//! places them on lowercased text: after `.`, `?` or `!` followed by
//! whitespace, except after known abbreviations, single-letter initials,
//! dotted acronyms, and numbers followed by a word that cannot open a
//! sentence.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Whitespace-delimited chunks.
static CHUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

/// Closing characters allowed after a sentence terminator.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '}', '\u{2019}', '\u{201D}', '\u{00BB}'];

/// Lowercase abbreviations whose trailing period never ends a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "inc", "ltd", "co",
        "corp", "dept", "approx", "est", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec", "mon", "tue", "tues", "wed", "thu", "thur", "thurs",
        "fri", "sat", "sun", "gen", "col", "lt", "sgt", "capt", "rev", "hon", "ave", "blvd",
    ]
    .into_iter()
    .collect()
});

/// Returns true if `word` looks like a number: a decimal digit followed by
/// digits, `,`, `.` or `-`.
fn is_numeric(word: &str) -> bool {
    let is_digit = |c: char| get_general_category(c) == GeneralCategory::DecimalNumber;
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if is_digit(c))
        && chars.all(|c| is_digit(c) || matches!(c, ',' | '.' | '-'))
}

/// Returns true if `next` cannot start a sentence: it begins with a
/// lowercase letter or is a lone mid-sentence punctuation mark.
fn continues_sentence(next: Option<&str>) -> bool {
    match next {
        Some(chunk) if matches!(chunk, ";" | ":" | "," | "." | "!" | "?") => true,
        Some(chunk) => chunk
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .next()
            .map_or(false, char::is_lowercase),
        None => false,
    }
}

/// Returns true if a whitespace-delimited chunk closes its sentence, given
/// the chunk that follows it.
fn ends_sentence(chunk: &str, next: Option<&str>) -> bool {
    let core = chunk.trim_end_matches(CLOSERS);

    if core.ends_with('?') || core.ends_with('!') {
        return true;
    }
    if !core.ends_with('.') || core.ends_with("..") {
        return false;
    }

    let word = core[..core.len() - 1].trim_start_matches(|c: char| !c.is_alphanumeric());
    if word.is_empty() {
        return true;
    }
    if ABBREVIATIONS.contains(word) || word.contains('.') {
        return false;
    }
    // Numbers keep their period when the next word cannot open a sentence.
    if is_numeric(word) {
        return !continues_sentence(next);
    }

    let mut chars = word.chars();
    !matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

/// Splits text into sentences.
///
/// Sentences are returned as trimmed slices of `text`, in order. Blank input
/// yields no sentences.
///
/// # Example
/// ```
/// use spamsift::text::split_sentences;
///
/// let sentences = split_sentences("see dr. who at 5. bring snacks! it starts at 6.");
/// assert_eq!(sentences, vec!["see dr. who at 5. bring snacks!", "it starts at 6."]);
/// ```
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    let chunks: Vec<_> = CHUNK.find_iter(text).collect();
    for (i, chunk) in chunks.iter().enumerate() {
        let next = chunks.get(i + 1).map(|m| m.as_str());
        if ends_sentence(chunk.as_str(), next) {
            sentences.push(text[start..chunk.end()].trim());
            start = chunk.end();
        }
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }

    sentences
}
