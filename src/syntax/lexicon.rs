//! Hand-curated word lists for exact-match categories
//!
//! All entries are lowercase with straight apostrophes. Callers normalize
//! input (see [`super::normalize`]) before looking anything up here.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use super::category::{Category, LexiconSource};

pub const ARTICLES: &[&str] = &["a", "an", "the"];

pub const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "despite", "down",
    "during", "except", "for", "from", "in", "inside", "into", "like", "near", "of", "off", "on",
    "onto", "out", "outside", "over", "past", "since", "through", "throughout", "to", "toward",
    "towards", "under", "underneath", "until", "up", "upon", "with", "within", "without",
];

pub const INTERJECTIONS: &[&str] = &[
    "ah", "aha", "ahem", "alas", "argh", "aw", "aww", "bah", "boo", "bravo", "brr", "cheers",
    "eek", "eh", "eureka", "gee", "golly", "gosh", "ha", "haha", "hey", "hi", "hmm", "hello",
    "hooray", "huh", "hurray", "meh", "oh", "ooh", "oops", "ouch", "ow", "phew", "psst", "shh",
    "ugh", "uh", "um", "umm", "whoa", "whoops", "wow", "yay", "yes", "yikes", "yippee", "yo",
    "yuck", "yum",
];

/// Categories a contraction belongs to; the first is where it is inserted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionEntry {
    pub categories: &'static [Category],
}

impl ContractionEntry {
    /// Insertion target
    pub fn primary(&self) -> Category {
        self.categories[0]
    }
}

const PRONOUN_VERB: &[Category] = &[Category::Pronouns, Category::Verbs];
const VERB_ONLY: &[Category] = &[Category::Verbs];

pub const CONTRACTIONS: &[(&str, ContractionEntry)] = &[
    ("i'm", ContractionEntry { categories: PRONOUN_VERB }),
    ("you're", ContractionEntry { categories: PRONOUN_VERB }),
    ("he's", ContractionEntry { categories: PRONOUN_VERB }),
    ("she's", ContractionEntry { categories: PRONOUN_VERB }),
    ("it's", ContractionEntry { categories: PRONOUN_VERB }),
    ("we're", ContractionEntry { categories: PRONOUN_VERB }),
    ("they're", ContractionEntry { categories: PRONOUN_VERB }),
    ("i've", ContractionEntry { categories: PRONOUN_VERB }),
    ("you've", ContractionEntry { categories: PRONOUN_VERB }),
    ("we've", ContractionEntry { categories: PRONOUN_VERB }),
    ("they've", ContractionEntry { categories: PRONOUN_VERB }),
    ("i'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("you'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("he'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("she'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("we'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("they'll", ContractionEntry { categories: PRONOUN_VERB }),
    ("i'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("you'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("he'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("she'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("we'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("they'd", ContractionEntry { categories: PRONOUN_VERB }),
    ("that's", ContractionEntry { categories: PRONOUN_VERB }),
    ("what's", ContractionEntry { categories: PRONOUN_VERB }),
    ("there's", ContractionEntry { categories: &[Category::Adverbs, Category::Verbs] }),
    ("let's", ContractionEntry { categories: &[Category::Verbs, Category::Pronouns] }),
    ("don't", ContractionEntry { categories: VERB_ONLY }),
    ("doesn't", ContractionEntry { categories: VERB_ONLY }),
    ("didn't", ContractionEntry { categories: VERB_ONLY }),
    ("can't", ContractionEntry { categories: VERB_ONLY }),
    ("couldn't", ContractionEntry { categories: VERB_ONLY }),
    ("won't", ContractionEntry { categories: VERB_ONLY }),
    ("wouldn't", ContractionEntry { categories: VERB_ONLY }),
    ("shouldn't", ContractionEntry { categories: VERB_ONLY }),
    ("mustn't", ContractionEntry { categories: VERB_ONLY }),
    ("isn't", ContractionEntry { categories: VERB_ONLY }),
    ("aren't", ContractionEntry { categories: VERB_ONLY }),
    ("wasn't", ContractionEntry { categories: VERB_ONLY }),
    ("weren't", ContractionEntry { categories: VERB_ONLY }),
    ("hasn't", ContractionEntry { categories: VERB_ONLY }),
    ("haven't", ContractionEntry { categories: VERB_ONLY }),
    ("hadn't", ContractionEntry { categories: VERB_ONLY }),
];

/// Lexicon lookups
pub struct Lexicon;

impl Lexicon {
    pub fn articles() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> =
            Lazy::new(|| ARTICLES.iter().copied().collect());
        &SET
    }

    pub fn prepositions() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> =
            Lazy::new(|| PREPOSITIONS.iter().copied().collect());
        &SET
    }

    pub fn interjections() -> &'static HashSet<&'static str> {
        static SET: Lazy<HashSet<&'static str>> =
            Lazy::new(|| INTERJECTIONS.iter().copied().collect());
        &SET
    }

    pub fn contractions() -> &'static HashMap<&'static str, ContractionEntry> {
        static MAP: Lazy<HashMap<&'static str, ContractionEntry>> =
            Lazy::new(|| CONTRACTIONS.iter().copied().collect());
        &MAP
    }

    /// Word set backing a lexicon-driven category
    pub fn for_source(source: LexiconSource) -> Option<&'static HashSet<&'static str>> {
        match source {
            LexiconSource::None => None,
            LexiconSource::Articles => Some(Self::articles()),
            LexiconSource::Prepositions => Some(Self::prepositions()),
            LexiconSource::Interjections => Some(Self::interjections()),
        }
    }
}
