//! The nine part-of-speech categories and their mapping table
//!
//! Every per-category decision (which tagger tag feeds it, which lexicon
//! refines it, where it ranks when a word belongs to several categories)
//! is read from [`CategorySpec`] instead of being spelled out per call site.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::tagger::GrammaticalTag;

/// Part-of-speech category used for highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Nouns,
    Pronouns,
    Verbs,
    Adjectives,
    Adverbs,
    Prepositions,
    Conjunctions,
    Articles,
    Interjections,
}

/// Which static lexicon, if any, contributes to a category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexiconSource {
    None,
    Articles,
    Prepositions,
    Interjections,
}

/// Row of the category mapping table
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    pub category: Category,
    /// Field name in the serialized analysis
    pub name: &'static str,
    /// Tagger tag that feeds this category, if the tagger is consulted
    pub tag: Option<GrammaticalTag>,
    pub lexicon: LexiconSource,
    /// Render precedence; lower wins when a word is in several categories
    pub priority: u8,
}

const TABLE: [CategorySpec; 9] = [
    CategorySpec {
        category: Category::Nouns,
        name: "nouns",
        tag: Some(GrammaticalTag::Noun),
        lexicon: LexiconSource::None,
        priority: 8,
    },
    CategorySpec {
        category: Category::Pronouns,
        name: "pronouns",
        tag: Some(GrammaticalTag::Pronoun),
        lexicon: LexiconSource::None,
        priority: 4,
    },
    CategorySpec {
        category: Category::Verbs,
        name: "verbs",
        tag: Some(GrammaticalTag::Verb),
        lexicon: LexiconSource::None,
        priority: 6,
    },
    CategorySpec {
        category: Category::Adjectives,
        name: "adjectives",
        tag: Some(GrammaticalTag::Adjective),
        lexicon: LexiconSource::None,
        priority: 7,
    },
    CategorySpec {
        category: Category::Adverbs,
        name: "adverbs",
        tag: Some(GrammaticalTag::Adverb),
        lexicon: LexiconSource::None,
        priority: 5,
    },
    CategorySpec {
        category: Category::Prepositions,
        name: "prepositions",
        tag: Some(GrammaticalTag::Preposition),
        lexicon: LexiconSource::Prepositions,
        priority: 2,
    },
    CategorySpec {
        category: Category::Conjunctions,
        name: "conjunctions",
        tag: Some(GrammaticalTag::Conjunction),
        lexicon: LexiconSource::None,
        priority: 3,
    },
    CategorySpec {
        category: Category::Articles,
        name: "articles",
        tag: None,
        lexicon: LexiconSource::Articles,
        priority: 0,
    },
    CategorySpec {
        category: Category::Interjections,
        name: "interjections",
        tag: None,
        lexicon: LexiconSource::Interjections,
        priority: 1,
    },
];

impl Category {
    /// All categories in field order
    pub const ALL: [Category; 9] = [
        Category::Nouns,
        Category::Pronouns,
        Category::Verbs,
        Category::Adjectives,
        Category::Adverbs,
        Category::Prepositions,
        Category::Conjunctions,
        Category::Articles,
        Category::Interjections,
    ];

    /// All categories in render precedence order
    pub const PRIORITY: [Category; 9] = [
        Category::Articles,
        Category::Interjections,
        Category::Prepositions,
        Category::Conjunctions,
        Category::Pronouns,
        Category::Adverbs,
        Category::Verbs,
        Category::Adjectives,
        Category::Nouns,
    ];

    /// Position in [`Category::ALL`], usable as an array index
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> &'static CategorySpec {
        &TABLE[self.index()]
    }

    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    pub fn tag(self) -> Option<GrammaticalTag> {
        self.spec().tag
    }

    pub fn priority(self) -> u8 {
        self.spec().priority
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(TABLE[i].category, *category);
        }
    }

    #[test]
    fn test_priority_order_is_consistent() {
        let mut sorted = Category::ALL;
        sorted.sort_by_key(|c| c.priority());
        assert_eq!(sorted, Category::PRIORITY);
    }

    #[test]
    fn test_six_tagger_categories() {
        let tagged = Category::ALL.iter().filter(|c| c.tag().is_some()).count();
        // Six core tags plus the preposition tag that is unioned with the lexicon
        assert_eq!(tagged, 7);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("verbs".parse::<Category>().unwrap(), Category::Verbs);
        assert_eq!("Articles".parse::<Category>().unwrap(), Category::Articles);
        assert!("gerunds".parse::<Category>().is_err());
    }

    #[test]
    fn test_serde_name_matches_table() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
        }
    }
}
