//! Classification result shapes

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use super::category::Category;
use super::normalize::normalize;

/// One classification pass: nine deduplicated lists of lowercase surface forms
///
/// A word may appear in more than one category; render precedence resolves
/// that later (see [`Category::PRIORITY`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxAnalysis {
    pub nouns: Vec<String>,
    pub pronouns: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
    pub adverbs: Vec<String>,
    pub prepositions: Vec<String>,
    pub conjunctions: Vec<String>,
    pub articles: Vec<String>,
    pub interjections: Vec<String>,
}

impl SyntaxAnalysis {
    /// All nine categories empty
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Nouns => &self.nouns,
            Category::Pronouns => &self.pronouns,
            Category::Verbs => &self.verbs,
            Category::Adjectives => &self.adjectives,
            Category::Adverbs => &self.adverbs,
            Category::Prepositions => &self.prepositions,
            Category::Conjunctions => &self.conjunctions,
            Category::Articles => &self.articles,
            Category::Interjections => &self.interjections,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Nouns => &mut self.nouns,
            Category::Pronouns => &mut self.pronouns,
            Category::Verbs => &mut self.verbs,
            Category::Adjectives => &mut self.adjectives,
            Category::Adverbs => &mut self.adverbs,
            Category::Prepositions => &mut self.prepositions,
            Category::Conjunctions => &mut self.conjunctions,
            Category::Articles => &mut self.articles,
            Category::Interjections => &mut self.interjections,
        }
    }

    /// Append `word` to `category` unless already present; returns whether it was added
    pub fn insert(&mut self, category: Category, word: &str) -> bool {
        let list = self.get_mut(category);
        if list.iter().any(|w| w == word) {
            return false;
        }
        list.push(word.to_string());
        true
    }

    pub fn contains(&self, category: Category, word: &str) -> bool {
        self.get(category).iter().any(|w| w == word)
    }

    /// Iterate `(category, words)` in field order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().all(|(_, words)| words.is_empty())
    }

    /// Copy with every entry lowercased and apostrophe-normalized
    ///
    /// Blank entries are dropped and entries that collapse together are deduplicated.
    pub fn normalized(&self) -> Self {
        let mut out = Self::empty();
        for (category, words) in self.iter() {
            for word in words {
                let word = normalize(word.trim());
                if !word.is_empty() {
                    out.insert(category, &word);
                }
            }
        }
        out
    }

    /// Total entries across all categories
    pub fn total_words(&self) -> usize {
        self.iter().map(|(_, words)| words.len()).sum()
    }
}

/// Union-to-date of every analysis seen in a document session
///
/// Only [`merge`](super::accumulator::merge) produces new states from old
/// ones, so a word once present stays present until an explicit clear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccumulatedSyntaxState(SyntaxAnalysis);

impl AccumulatedSyntaxState {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_analysis(analysis: SyntaxAnalysis) -> Self {
        Self(analysis)
    }

    pub fn into_analysis(self) -> SyntaxAnalysis {
        self.0
    }
}

impl Deref for AccumulatedSyntaxState {
    type Target = SyntaxAnalysis;

    fn deref(&self) -> &SyntaxAnalysis {
        &self.0
    }
}
