//! Text normalization pipeline: sentence splitting, tokenization,
//! lexical filtering and lemmatization.

mod filter;
mod lemmatizer;
mod normalizer;
mod sentence;
mod stopwords;
mod tokenizer;

pub use filter::LexicalFilter;
pub use lemmatizer::{Lemmatizer, NOUN_EXCEPTIONS, NOUN_INDEX};
pub use normalizer::{NormalizationTrace, NormalizedText, Normalizer};
pub use sentence::split_sentences;
pub use stopwords::StopWords;
pub use tokenizer::{tokenize_sentence, WordTokenizer};
