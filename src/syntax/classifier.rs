//! Text to [`SyntaxAnalysis`]
//!
//! Composition of the grammatical tagger, the static lexicons and the
//! contraction expander. A tagger failure empties the affected category and
//! the pass carries on.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::analysis::SyntaxAnalysis;
use super::category::{Category, LexiconSource};
use super::contractions::expand_contractions;
use super::lexicon::{Lexicon, INTERJECTIONS};
use super::normalize::{normalize, whitespace_tokens};
use super::tagger::{LexicalTagger, TaggedDocument, Tagger};

/// `entry!` starting on a word boundary, one per interjection
static EXCLAIMED_INTERJECTIONS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    INTERJECTIONS
        .iter()
        .map(|entry| {
            let regex = Regex::new(&format!(r"\b{}!", regex::escape(entry)))
                .expect("Valid interjection regex");
            (*entry, regex)
        })
        .collect()
});

/// Anything that turns text into a classification
///
/// Implemented by [`Classifier`]; the dispatcher's worker is generic over it.
pub trait Analyze: Send + Sync + 'static {
    fn analyze(&self, text: &str) -> SyntaxAnalysis;
}

/// Part-of-speech classifier
pub struct Classifier<T: Tagger = LexicalTagger> {
    tagger: T,
}

impl Classifier<LexicalTagger> {
    pub fn new() -> Self {
        Self::with_tagger(LexicalTagger::new())
    }
}

impl Default for Classifier<LexicalTagger> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tagger> Classifier<T> {
    pub fn with_tagger(tagger: T) -> Self {
        Self { tagger }
    }

    pub fn tagger(&self) -> &T {
        &self.tagger
    }

    /// Classify `text` into the nine categories
    pub fn classify(&self, text: &str) -> SyntaxAnalysis {
        let mut result = SyntaxAnalysis::empty();
        if text.trim().is_empty() {
            return result;
        }

        let normalized = normalize(text);
        let tokens: Vec<&str> = whitespace_tokens(&normalized).collect();

        self.tag_categories(&normalized, &mut result);

        // Lexicon categories: articles and prepositions by exact whitespace token
        for category in [Category::Articles, Category::Prepositions] {
            if let Some(lexicon) = Lexicon::for_source(category.spec().lexicon) {
                for token in &tokens {
                    if lexicon.contains(token) {
                        result.insert(category, token);
                    }
                }
            }
        }

        Self::find_interjections(&normalized, &tokens, &mut result);

        expand_contractions(text, &mut result);

        debug!(
            "Classified {} tokens into {} entries",
            tokens.len(),
            result.total_words()
        );
        result
    }

    /// Tag-derived categories; each extraction fails independently
    fn tag_categories(&self, normalized: &str, result: &mut SyntaxAnalysis) {
        let doc = match self.tagger.tag_text(normalized) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Tagging failed, tag-derived categories left empty: {}", e);
                TaggedDocument::default()
            }
        };

        for category in Category::ALL {
            let Some(tag) = category.tag() else { continue };

            match self.tagger.extract_by_tag(&doc, tag) {
                Ok(words) => {
                    for word in words {
                        result.insert(category, &word.to_lowercase());
                    }
                }
                Err(e) => {
                    warn!("Extracting {} failed, leaving it empty: {}", category, e);
                }
            }
        }
    }

    /// Interjections match as a bare token, or anywhere in the text when
    /// directly followed by `!` from a word boundary ("wow!", "“oh!”", "(ah!)")
    fn find_interjections(normalized: &str, tokens: &[&str], result: &mut SyntaxAnalysis) {
        debug_assert_eq!(
            Category::Interjections.spec().lexicon,
            LexiconSource::Interjections
        );

        let token_set: HashSet<&str> = tokens.iter().copied().collect();
        for (entry, exclaimed) in EXCLAIMED_INTERJECTIONS.iter() {
            if token_set.contains(entry) || exclaimed.is_match(normalized) {
                result.insert(Category::Interjections, entry);
            }
        }
    }
}

impl<T: Tagger + 'static> Analyze for Classifier<T> {
    fn analyze(&self, text: &str) -> SyntaxAnalysis {
        self.classify(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, SyntaxError};
    use crate::syntax::tagger::GrammaticalTag;

    fn set(words: &[String]) -> HashSet<&str> {
        words.iter().map(String::as_str).collect()
    }

    /// Tagger whose extraction fails for one tag
    struct FlakyTagger {
        failing: GrammaticalTag,
    }

    impl Tagger for FlakyTagger {
        fn tag_text(&self, text: &str) -> Result<TaggedDocument> {
            LexicalTagger::new().tag_text(text)
        }

        fn extract_by_tag(&self, doc: &TaggedDocument, tag: GrammaticalTag) -> Result<Vec<String>> {
            if tag == self.failing {
                return Err(SyntaxError::Tagger("malformed output".to_string()));
            }
            Ok(doc.extract(tag))
        }
    }

    /// Tagger that fails outright
    struct BrokenTagger;

    impl Tagger for BrokenTagger {
        fn tag_text(&self, _text: &str) -> Result<TaggedDocument> {
            Err(SyntaxError::Tagger("model not loaded".to_string()))
        }
    }

    /// Tagger that labels nothing as a preposition
    struct NoPrepositionTagger;

    impl Tagger for NoPrepositionTagger {
        fn tag_text(&self, text: &str) -> Result<TaggedDocument> {
            let mut doc = LexicalTagger::new().tag_text(text)?;
            for token in &mut doc.tokens {
                if token.tag == GrammaticalTag::Preposition {
                    token.tag = GrammaticalTag::Noun;
                }
            }
            Ok(doc)
        }
    }

    /// Tagger that labels "zorp" as a preposition
    struct InventedPrepositionTagger;

    impl Tagger for InventedPrepositionTagger {
        fn tag_text(&self, text: &str) -> Result<TaggedDocument> {
            let mut doc = LexicalTagger::new().tag_text(text)?;
            for token in &mut doc.tokens {
                if token.text == "zorp" {
                    token.tag = GrammaticalTag::Preposition;
                }
            }
            Ok(doc)
        }
    }

    #[test]
    fn test_empty_input() {
        let classifier = Classifier::new();
        assert!(classifier.classify("").is_empty());
        assert!(classifier.classify("   \n\t").is_empty());
    }

    #[test]
    fn test_empty_input_skips_tagger() {
        // A broken tagger is never reached for blank input
        let classifier = Classifier::with_tagger(BrokenTagger);
        assert_eq!(classifier.classify("  "), SyntaxAnalysis::empty());
    }

    #[test]
    fn test_articles() {
        let result = Classifier::new().classify("The cat and a dog. The end");
        assert_eq!(set(&result.articles), HashSet::from(["the", "a"]));
        assert_eq!(result.articles.len(), 2);
    }

    #[test]
    fn test_interjection_with_exclamation() {
        let result = Classifier::new().classify("Wow! That's great");
        assert!(result.contains(Category::Interjections, "wow"));
    }

    #[test]
    fn test_interjection_inside_quotes_and_brackets() {
        let classifier = Classifier::new();
        for text in ["\u{201C}Wow!\u{201D} she said", "\"Wow!\" she said", "'wow!' she said"] {
            assert!(
                classifier.classify(text).contains(Category::Interjections, "wow"),
                "missed in {}",
                text
            );
        }
        assert!(classifier
            .classify("(oh!) fine")
            .contains(Category::Interjections, "oh"));
    }

    #[test]
    fn test_exclaimed_interjection_needs_word_start() {
        let result = Classifier::new().classify("Bravo! How rough!");
        assert!(result.contains(Category::Interjections, "bravo"));
        assert!(!result.contains(Category::Interjections, "ugh"));
    }

    #[test]
    fn test_interjection_prefix_is_not_a_match() {
        let result = Classifier::new().classify("Ohio is far");
        assert!(!result.contains(Category::Interjections, "oh"));
    }

    #[test]
    fn test_apostrophe_equivalence() {
        let classifier = Classifier::new();
        let straight = classifier.classify("don't");
        let curly = classifier.classify("don\u{2019}t");

        for category in Category::ALL {
            assert_eq!(
                straight.contains(category, "don't"),
                curly.contains(category, "don't"),
                "{} differs",
                category
            );
        }
        assert!(straight.contains(Category::Verbs, "don't"));
    }

    #[test]
    fn test_preposition_union_lexicon_only() {
        let classifier = Classifier::with_tagger(NoPrepositionTagger);
        let result = classifier.classify("walk through the park");
        assert!(result.contains(Category::Prepositions, "through"));
    }

    #[test]
    fn test_preposition_union_tagger_only() {
        let classifier = Classifier::with_tagger(InventedPrepositionTagger);
        let result = classifier.classify("sit zorp the table under it");
        assert!(result.contains(Category::Prepositions, "zorp"));
        assert!(result.contains(Category::Prepositions, "under"));
    }

    #[test]
    fn test_preposition_punctuation_is_approximate() {
        // "in." fails the whitespace lexicon match and this tagger reports no prepositions
        let classifier = Classifier::with_tagger(NoPrepositionTagger);
        let result = classifier.classify("come in.");
        assert!(!result.contains(Category::Prepositions, "in"));
    }

    #[test]
    fn test_partial_degradation() {
        let classifier = Classifier::with_tagger(FlakyTagger {
            failing: GrammaticalTag::Noun,
        });
        let result = classifier.classify("The quick brown fox jumps over the lazy dog");

        assert!(result.nouns.is_empty());
        assert!(result.contains(Category::Verbs, "jumps"));
        assert!(result.contains(Category::Adjectives, "lazy"));
        assert!(result.contains(Category::Articles, "the"));
    }

    #[test]
    fn test_tagger_failure_keeps_lexicon_categories() {
        let classifier = Classifier::with_tagger(BrokenTagger);
        let result = classifier.classify("Hey! The dog can't sit on the mat");

        assert!(result.nouns.is_empty());
        assert!(result.verbs.contains(&"can't".to_string()));
        assert!(result.contains(Category::Interjections, "hey"));
        assert!(result.contains(Category::Prepositions, "on"));
    }

    #[test]
    fn test_idempotent() {
        let classifier = Classifier::new();
        let text = "Oh! I'm sure they quickly ran across the bright field";
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }

    #[test]
    fn test_all_words_lowercase() {
        let result = Classifier::new().classify("WOW! The BIG Dog RAN Quickly");
        for (_, words) in result.iter() {
            for word in words {
                assert_eq!(word, &word.to_lowercase());
            }
        }
    }

    #[test]
    fn test_no_duplicates_within_category() {
        let result = Classifier::new().classify("dog dog the the on on wow wow!");
        for (category, words) in result.iter() {
            assert_eq!(set(words).len(), words.len(), "{} has duplicates", category);
        }
    }
}
