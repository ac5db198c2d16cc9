//! O(1) membership projection of the accumulated state
//!
//! Rebuilt only when the accumulated state changes; queried for every
//! visible token on every render.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use super::accumulator::Accumulator;
use super::analysis::AccumulatedSyntaxState;
use super::category::Category;
use super::normalize::words;

/// One hash set per category; entries are lowercase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyntaxSets {
    sets: [HashSet<String>; 9],
}

impl SyntaxSets {
    /// Membership test; `word` must already be normalized
    pub fn has(&self, category: Category, word: &str) -> bool {
        self.sets[category.index()].contains(word)
    }

    pub fn get(&self, category: Category) -> &HashSet<String> {
        &self.sets[category.index()]
    }

    /// Highest-precedence category containing `word`
    pub fn category_of(&self, word: &str) -> Option<Category> {
        Category::PRIORITY.into_iter().find(|c| self.has(*c, word))
    }

    pub fn is_empty(&self) -> bool {
        self.sets.iter().all(HashSet::is_empty)
    }

    /// Per-category counts of the distinct words currently in `text`
    pub fn breakdown(&self, text: &str) -> Breakdown {
        let distinct: HashSet<String> = words(text).into_iter().collect();

        let counts = Category::ALL
            .into_iter()
            .map(|category| {
                let count = distinct.iter().filter(|w| self.has(category, w)).count();
                (category, count)
            })
            .collect();

        Breakdown {
            total_words: distinct.len(),
            counts,
        }
    }
}

/// Word-count breakdown for the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Distinct words in the current text
    pub total_words: usize,
    pub counts: BTreeMap<Category, usize>,
}

impl Breakdown {
    pub fn count(&self, category: Category) -> usize {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

/// Build the set projection of `state`
pub fn project(state: &AccumulatedSyntaxState) -> SyntaxSets {
    let mut sets = SyntaxSets::default();
    for (category, words) in state.iter() {
        sets.sets[category.index()] = words.iter().cloned().collect();
    }
    sets
}

/// Memoized projection keyed on the accumulator revision
#[derive(Debug, Default)]
pub struct ProjectionCache {
    revision: Option<u64>,
    sets: Arc<SyntaxSets>,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current projection, rebuilt only if the accumulator changed
    pub fn get(&mut self, accumulator: &Accumulator) -> Arc<SyntaxSets> {
        if self.revision != Some(accumulator.revision()) {
            self.sets = Arc::new(project(accumulator.state()));
            self.revision = Some(accumulator.revision());
        }
        Arc::clone(&self.sets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::analysis::SyntaxAnalysis;

    fn accumulator_with(pairs: &[(Category, &str)]) -> Accumulator {
        let mut analysis = SyntaxAnalysis::empty();
        for (category, word) in pairs {
            analysis.insert(*category, word);
        }
        let mut acc = Accumulator::new();
        acc.apply(&analysis);
        acc
    }

    #[test]
    fn test_project_membership() {
        let acc = accumulator_with(&[(Category::Nouns, "dog"), (Category::Verbs, "run")]);
        let sets = project(acc.state());

        assert!(sets.has(Category::Nouns, "dog"));
        assert!(sets.has(Category::Verbs, "run"));
        assert!(!sets.has(Category::Verbs, "dog"));
        assert!(!sets.has(Category::Nouns, "Dog"));
    }

    #[test]
    fn test_category_of_uses_priority() {
        let acc = accumulator_with(&[
            (Category::Nouns, "can"),
            (Category::Verbs, "can"),
            (Category::Adjectives, "light"),
        ]);
        let sets = project(acc.state());

        assert_eq!(sets.category_of("can"), Some(Category::Verbs));
        assert_eq!(sets.category_of("light"), Some(Category::Adjectives));
        assert_eq!(sets.category_of("unknown"), None);
    }

    #[test]
    fn test_cache_rebuilds_on_revision_only() {
        let mut acc = accumulator_with(&[(Category::Nouns, "dog")]);
        let mut cache = ProjectionCache::new();

        let first = cache.get(&acc);
        let second = cache.get(&acc);
        assert!(Arc::ptr_eq(&first, &second));

        let mut more = SyntaxAnalysis::empty();
        more.insert(Category::Nouns, "cat");
        acc.apply(&more);

        let third = cache.get(&acc);
        assert!(!Arc::ptr_eq(&first, &third));
        assert!(third.has(Category::Nouns, "cat"));
    }

    #[test]
    fn test_breakdown_counts_current_text_only() {
        let acc = accumulator_with(&[
            (Category::Nouns, "dog"),
            (Category::Nouns, "cat"),
            (Category::Articles, "the"),
        ]);
        let sets = project(acc.state());

        // "cat" was seen before but is not on screen
        let breakdown = sets.breakdown("The dog saw the DOG");
        assert_eq!(breakdown.total_words, 3);
        assert_eq!(breakdown.count(Category::Nouns), 1);
        assert_eq!(breakdown.count(Category::Articles), 1);
        assert_eq!(breakdown.count(Category::Verbs), 0);
        assert_eq!(breakdown.counts.len(), 9);
    }
}
