use crate::StopwordSet;

/// Whitespace tokens of `text`, in order.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Drop every token whose lowercase form is in `stopwords`.
///
/// Survivors keep their casing and order and are joined by single spaces.
pub fn filter_stopwords(text: &str, stopwords: &StopwordSet) -> String {
    let mut out = String::with_capacity(text.len());
    for token in tokens(text) {
        if stopwords.contains_lowercase(&token.to_lowercase()) {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(token);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn removes_case_insensitive_matches() {
        let set = StopwordSet::from_words(["the"]);
        assert_eq!(
            filter_stopwords("The Quick fox the FOX", &set),
            "Quick fox FOX"
        );
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(filter_stopwords("", &StopwordSet::defaults()), "");
        assert_eq!(filter_stopwords(" \n\t ", &StopwordSet::empty()), "");
    }

    #[test]
    fn collapses_whitespace_runs() {
        let out = filter_stopwords("alpha\n\n  beta\tgamma ", &StopwordSet::empty());
        assert_eq!(out, "alpha beta gamma");
    }

    #[test]
    fn punctuation_is_not_stripped() {
        let set = StopwordSet::from_words(["the"]);
        assert_eq!(filter_stopwords("the, The. the", &set), "the, The.");
    }

    fn word() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("the".to_string()),
            Just("The".to_string()),
            Just("AND".to_string()),
            "[a-zA-Z']{1,8}",
        ]
    }

    proptest! {
        #[test]
        fn no_stopword_survives(words in prop::collection::vec(word(), 0..40)) {
            let set = StopwordSet::from_words(["the", "and", "a"]);
            let text = words.join(" ");
            let out = filter_stopwords(&text, &set);
            for token in out.split(' ').filter(|t| !t.is_empty()) {
                prop_assert!(!set.is_stopword(token));
            }
        }

        #[test]
        fn survivors_keep_relative_order(words in prop::collection::vec(word(), 0..40)) {
            let set = StopwordSet::defaults();
            let text = words.join("  \n");
            let expected: Vec<&str> = words
                .iter()
                .map(String::as_str)
                .filter(|w| !set.is_stopword(w))
                .collect();
            let out = filter_stopwords(&text, &set);
            let got: Vec<&str> = out.split_whitespace().collect();
            prop_assert_eq!(got, expected);
        }

        #[test]
        fn filtering_is_idempotent(text in "[a-zA-Z \n\t]{0,200}") {
            let set = StopwordSet::defaults();
            let once = filter_stopwords(&text, &set);
            let twice = filter_stopwords(&once, &set);
            prop_assert_eq!(twice, once);
        }
    }
}
