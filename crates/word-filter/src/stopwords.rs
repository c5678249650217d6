use ahash::AHashSet;
use core_types::config::StopwordConfig;

/// Built-in English stopword list.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between",
    "both", "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't",
    "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "else", "ever", "few",
    "for", "from", "further", "get", "had", "hadn't", "has", "hasn't", "have", "haven't",
    "having", "he", "he'd", "he'll", "he's", "hence", "her", "here", "here's", "hers",
    "herself", "him", "himself", "his", "how", "how's", "however", "http", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "just",
    "k", "let's", "like", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "otherwise", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "r", "same", "shall", "shan't", "she", "she'd",
    "she'll", "she's", "should", "shouldn't", "since", "so", "some", "such", "than", "that",
    "that's", "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "therefore", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Lowercase stopwords for one batch. Built once, then only read.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: AHashSet<String>,
}

impl StopwordSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in list alone.
    pub fn defaults() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }

    /// Entries are trimmed and lowercased; blanks are dropped.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .filter_map(|w| normalize(w.as_ref()))
            .collect();
        Self { words }
    }

    /// Built-in list unioned with user words. This is the set text is filtered with.
    pub fn with_custom<I, S>(custom: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::defaults();
        set.extend(custom);
        set
    }

    /// Filter set for a batch: the built-in list is always included.
    pub fn from_config(cfg: &StopwordConfig) -> Self {
        Self::with_custom(&cfg.custom)
    }

    /// Words the cloud renderer skips. `use_default` only affects this set,
    /// never the filtered text.
    pub fn cloud_from_config(cfg: &StopwordConfig) -> Self {
        if cfg.use_default {
            Self::with_custom(&cfg.custom)
        } else {
            Self::from_words(&cfg.custom)
        }
    }

    fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().filter_map(|w| normalize(w.as_ref())));
    }

    /// `word` is lowercased before lookup.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.words.contains(word.to_lowercase().as_str())
    }

    pub fn contains_lowercase(&self, lowered: &str) -> bool {
        self.words.contains(lowered)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopwordSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_words(iter)
    }
}

/// Split comma-separated user input into stopword entries.
pub fn parse_custom_stopwords(raw: &str) -> Vec<String> {
    raw.split(',').filter_map(normalize).collect()
}

fn normalize(word: &str) -> Option<String> {
    let trimmed = word.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lowercase_and_unique() {
        let set = StopwordSet::defaults();
        assert_eq!(set.len(), DEFAULT_STOPWORDS.len());
        assert!(set.iter().all(|w| w == w.to_lowercase()));
        assert!(set.is_stopword("The"));
        assert!(set.is_stopword("you've"));
        assert!(!set.is_stopword("cloud"));
    }

    #[test]
    fn custom_words_are_trimmed_and_lowercased() {
        let custom = parse_custom_stopwords(" Lorem, IPSUM ,, ,dolor");
        assert_eq!(custom, vec!["lorem", "ipsum", "dolor"]);
        let set = StopwordSet::with_custom(&custom);
        assert!(set.is_stopword("Ipsum"));
        assert!(set.is_stopword("the"));
        assert_eq!(set.len(), DEFAULT_STOPWORDS.len() + 3);
    }

    #[test]
    fn empty_input_parses_to_nothing() {
        assert!(parse_custom_stopwords("").is_empty());
        assert!(StopwordSet::from_words(parse_custom_stopwords("  ")).is_empty());
    }

    #[test]
    fn filter_set_always_includes_defaults() {
        let cfg = StopwordConfig {
            use_default: false,
            custom: vec!["Alpha".into()],
        };
        let set = StopwordSet::from_config(&cfg);
        assert!(set.is_stopword("alpha"));
        assert!(set.is_stopword("and"));
        assert_eq!(
            crate::filter_stopwords("The Quick fox and the FOX", &set),
            "Quick fox FOX"
        );
    }

    #[test]
    fn toggle_only_narrows_cloud_set() {
        let mut cfg = StopwordConfig {
            use_default: false,
            custom: vec!["foo".into()],
        };
        let cloud = StopwordSet::cloud_from_config(&cfg);
        assert_eq!(cloud.len(), 1);
        assert!(cloud.is_stopword("FOO"));
        assert!(!cloud.is_stopword("the"));

        cfg.use_default = true;
        let cloud = StopwordSet::cloud_from_config(&cfg);
        assert!(cloud.is_stopword("the"));
        assert!(cloud.is_stopword("foo"));
    }
}
