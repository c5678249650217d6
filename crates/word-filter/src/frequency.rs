use indexmap::IndexMap;
use serde::Serialize;

use crate::tokens;

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

impl WordCount {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Count identical whitespace tokens, case-sensitively.
///
/// Rows are ordered by count, highest first; ties keep first-appearance order.
pub fn count_words(text: &str) -> Vec<WordCount> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for token in tokens(text) {
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut rows: Vec<WordCount> = counts
        .into_iter()
        .map(|(word, count)| WordCount::new(word, count))
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn counts_repeated_tokens() {
        let rows = count_words("a a b");
        let as_map: HashMap<_, _> = rows.iter().map(|r| (r.word.as_str(), r.count)).collect();
        assert_eq!(as_map, HashMap::from([("a", 2), ("b", 1)]));
    }

    #[test]
    fn highest_count_first_then_first_seen() {
        let rows = count_words("z y x y x x w");
        let words: Vec<_> = rows.iter().map(|r| r.word.as_str()).collect();
        assert_eq!(words, vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn counting_is_case_sensitive() {
        let rows = count_words("Fox fox FOX fox");
        assert_eq!(rows[0], WordCount::new("fox", 2));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn empty_text_has_no_rows() {
        assert!(count_words("").is_empty());
        assert!(count_words("   ").is_empty());
    }
}
