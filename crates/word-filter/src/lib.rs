//! Stopword removal and word counting over extracted text.
//!
//! Tokenization everywhere in this crate is plain whitespace splitting: no
//! punctuation stripping, no stemming, no locale-aware casing.

mod filter;
mod frequency;
mod stopwords;

pub use filter::{filter_stopwords, tokens};
pub use frequency::{WordCount, count_words};
pub use stopwords::{DEFAULT_STOPWORDS, StopwordSet, parse_custom_stopwords};
