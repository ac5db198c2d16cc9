//! Contraction expansion
//!
//! Taggers are unreliable on contracted forms, so every contraction found in
//! the text is inserted into its primary category from the lexicon.

use once_cell::sync::Lazy;
use regex::Regex;

use super::analysis::SyntaxAnalysis;
use super::lexicon::{ContractionEntry, CONTRACTIONS};
use super::normalize::{normalize, APOSTROPHE_CLASS};

/// Word-boundary matcher for one contraction; any apostrophe form matches
fn contraction_pattern(contraction: &str) -> String {
    let body = contraction
        .split('\'')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(APOSTROPHE_CLASS);
    format!(r"(?:^|[^\p{{L}}\p{{N}}]){}(?:$|[^\p{{L}}\p{{N}}])", body)
}

static MATCHERS: Lazy<Vec<(&'static str, ContractionEntry, Regex)>> = Lazy::new(|| {
    CONTRACTIONS
        .iter()
        .map(|(word, entry)| {
            let regex = Regex::new(&contraction_pattern(word)).expect("Valid contraction regex");
            (*word, *entry, regex)
        })
        .collect()
});

/// Add every contraction present in `text` to its primary category
///
/// Secondary categories in the lexicon entry are descriptive only and never
/// receive the word.
pub fn expand_contractions(text: &str, result: &mut SyntaxAnalysis) {
    let normalized = normalize(text);

    for (word, entry, regex) in MATCHERS.iter() {
        if regex.is_match(&normalized) {
            result.insert(entry.primary(), word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::category::Category;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(MATCHERS.len(), CONTRACTIONS.len());
    }

    #[test]
    fn test_primary_category_only() {
        let mut result = SyntaxAnalysis::empty();
        expand_contractions("I'm late", &mut result);

        assert_eq!(result.pronouns, vec!["i'm"]);
        assert!(!result.contains(Category::Verbs, "i'm"));
    }

    #[test]
    fn test_curly_apostrophe() {
        let mut straight = SyntaxAnalysis::empty();
        let mut curly = SyntaxAnalysis::empty();
        expand_contractions("don't", &mut straight);
        expand_contractions("don\u{2019}t", &mut curly);

        assert_eq!(straight.verbs, vec!["don't"]);
        assert_eq!(straight, curly);
    }

    #[test]
    fn test_word_boundaries() {
        let mut result = SyntaxAnalysis::empty();
        // "we'd" must not fire inside "owe'd"-like tokens
        expand_contractions("Powe'd shouldn't", &mut result);

        assert!(!result.contains(Category::Pronouns, "we'd"));
        assert!(result.contains(Category::Verbs, "shouldn't"));
    }

    #[test]
    fn test_contraction_after_opening_quote() {
        let mut result = SyntaxAnalysis::empty();
        expand_contractions("\u{2018}Don\u{2019}t go\u{2019}", &mut result);
        assert_eq!(result.verbs, vec!["don't"]);

        let mut straight = SyntaxAnalysis::empty();
        expand_contractions("'I'm here'", &mut straight);
        assert!(straight.contains(Category::Pronouns, "i'm"));
    }

    #[test]
    fn test_punctuation_after_contraction() {
        let mut result = SyntaxAnalysis::empty();
        expand_contractions("No, I can't! Won't.", &mut result);

        assert!(result.contains(Category::Verbs, "can't"));
        assert!(result.contains(Category::Verbs, "won't"));
    }

    #[test]
    fn test_existing_entry_not_duplicated() {
        let mut result = SyntaxAnalysis::empty();
        result.insert(Category::Verbs, "don't");
        expand_contractions("don't don't", &mut result);

        assert_eq!(result.verbs, vec!["don't"]);
    }
}
