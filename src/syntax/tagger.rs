//! Grammatical tagging
//!
//! The classifier consumes tagging through the narrow [`Tagger`] trait:
//! tag a document once, then pull the unique lowercase surface forms for one
//! grammatical tag at a time. [`LexicalTagger`] is the bundled implementation,
//! a closed-class lexicon plus suffix morphology plus a left-to-right
//! context pass. It does not disambiguate beyond that.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use super::category::Category;
use super::lexicon::{Lexicon, INTERJECTIONS, PREPOSITIONS};
use super::normalize::normalize;
use crate::error::Result;

/// Grammatical tag assigned to a single token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammaticalTag {
    Noun,
    Pronoun,
    Verb,
    Adjective,
    Adverb,
    Preposition,
    Conjunction,
    Determiner,
    Interjection,
    Number,
    Punctuation,
}

/// A token with its assigned tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Lowercase, apostrophe-normalized surface form
    pub text: String,
    pub tag: GrammaticalTag,
}

/// Output of one tagging pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedDocument {
    pub tokens: Vec<TaggedToken>,
}

impl TaggedDocument {
    pub fn new(tokens: Vec<TaggedToken>) -> Self {
        Self { tokens }
    }

    /// Unique surface forms carrying `tag`, in first-seen order
    pub fn extract(&self, tag: GrammaticalTag) -> Vec<String> {
        let mut seen = HashSet::new();
        self.tokens
            .iter()
            .filter(|t| t.tag == tag && !t.text.is_empty())
            .filter(|t| seen.insert(t.text.as_str()))
            .map(|t| t.text.clone())
            .collect()
    }
}

/// Part-of-speech tagging capability
pub trait Tagger: Send + Sync {
    /// Tag a whole document
    fn tag_text(&self, text: &str) -> Result<TaggedDocument>;

    /// Unique lowercase surface forms matching `tag`
    fn extract_by_tag(&self, doc: &TaggedDocument, tag: GrammaticalTag) -> Result<Vec<String>> {
        Ok(doc.extract(tag))
    }
}

static TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*|[^\s\p{L}\p{N}]")
        .expect("Valid token regex")
});

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "myself", "you", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "her", "hers", "herself", "it", "its", "itself", "we", "us",
    "our", "ours", "ourselves", "they", "them", "their", "theirs", "themselves", "who", "whom",
    "whose", "whoever", "someone", "somebody", "something", "anyone", "anybody", "anything",
    "everyone", "everybody", "everything", "nobody", "nothing", "none",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "yet", "so", "because", "although", "though", "while", "whereas",
    "unless", "if", "whether", "as", "once", "than", "when", "whenever", "where", "wherever",
    "lest", "either", "neither", "both",
];

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "each", "every", "some", "any", "no",
    "another", "such", "what", "which", "all", "few", "many", "much", "several", "most", "more",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "having",
    "do", "does", "did", "done", "can", "could", "will", "would", "shall", "should", "may",
    "might", "must", "ought",
];

const ADVERBS: &[&str] = &[
    "not", "very", "too", "also", "just", "only", "even", "still", "already", "always", "never",
    "often", "sometimes", "usually", "seldom", "rarely", "soon", "now", "then", "here", "there",
    "today", "tomorrow", "yesterday", "tonight", "again", "almost", "quite", "rather", "really",
    "away", "back", "ever", "far", "fast", "hard", "late", "later", "maybe", "perhaps", "once",
    "twice", "together", "well", "yet", "indeed", "instead", "anyway", "somewhere", "anywhere",
    "everywhere", "nowhere", "how", "why", "ago", "forward", "home", "least",
];

const ADJECTIVES: &[&str] = &[
    "able", "bad", "beautiful", "best", "better", "big", "black", "blue", "bright", "brown",
    "busy", "calm", "cheap", "clean", "clear", "close", "cold", "common", "cool", "crazy",
    "dark", "dead", "deep", "different", "dirty", "dry", "early", "easy", "empty", "entire",
    "fair", "false", "fat", "few", "fine", "first", "free", "fresh", "full", "funny", "gentle",
    "glad", "gold", "good", "grand", "gray", "great", "green", "grey", "happy", "heavy", "high",
    "hot", "huge", "important", "kind", "large", "last", "lazy", "light", "little", "long",
    "loud", "low", "mad", "main", "new", "next", "nice", "old", "open", "orange", "other",
    "own", "pink", "plain", "poor", "pretty", "proud", "purple", "quick", "quiet", "rare",
    "ready", "real", "red", "rich", "right", "rough", "round", "sad", "safe", "same", "sharp",
    "short", "sick", "silent", "simple", "slow", "small", "smart", "soft", "strange", "strong",
    "sure", "sweet", "tall", "thick", "thin", "tiny", "tired", "true", "ugly", "warm", "weak",
    "wet", "white", "whole", "wide", "wild", "wise", "wrong", "yellow", "young",
];

/// Base forms; inflections are recovered by [`verb_lemma`]
const VERBS: &[&str] = &[
    "accept", "add", "agree", "allow", "answer", "appear", "arrive", "ask", "bake", "believe",
    "belong", "borrow", "break", "bring", "build", "buy", "call", "carry", "catch", "change",
    "choose", "clean", "climb", "close", "come", "cook", "count", "cover", "cry", "cut",
    "dance", "decide", "die", "dream", "drink", "drive", "eat", "end", "enjoy", "explain",
    "fall", "feel", "fight", "find", "finish", "fly", "follow", "forget", "get", "give", "go",
    "grow", "happen", "hate", "hear", "help", "hide", "hold", "hope", "hurry", "jump", "keep",
    "kick", "kill", "know", "laugh", "lead", "learn", "leave", "lend", "let", "lie", "like",
    "listen", "live", "look", "lose", "love", "make", "mean", "meet", "move", "need", "open",
    "pay", "play", "pull", "push", "put", "rain", "reach", "read", "remember", "run", "say",
    "see", "seem", "sell", "send", "shout", "show", "sing", "sit", "sleep", "smile", "speak",
    "stand", "start", "stay", "stop", "study", "swim", "take", "talk", "teach", "tell",
    "think", "throw", "touch", "travel", "try", "turn", "type", "understand", "use", "wait",
    "walk", "want", "watch", "win", "wish", "wonder", "work", "worry", "write",
];

const IRREGULAR_VERB_FORMS: &[&str] = &[
    "ate", "became", "began", "begun", "bit", "bitten", "blew", "blown", "bought", "brought",
    "built", "came", "caught", "chose", "chosen", "drank", "drove", "driven", "drunk", "eaten",
    "fell", "fallen", "felt", "fought", "found", "flew", "flown", "forgot", "forgotten", "gave",
    "given", "gone", "got", "gotten", "grew", "grown", "heard", "held", "hid", "hidden", "kept",
    "knew", "known", "led", "left", "lent", "lost", "made", "meant", "met", "paid", "ran",
    "rang", "rode", "said", "sang", "sat", "saw", "seen", "sent", "shot", "slept", "sold",
    "spoke", "spoken", "stood", "swam", "taken", "taught", "thought", "threw", "thrown", "told",
    "took", "understood", "went", "won", "woke", "wore", "worn", "wrote", "written",
];

const NOUN_SUFFIXES: &[&str] = &[
    "tion", "sion", "ment", "ness", "ity", "ism", "ship", "hood", "ance", "ence", "dom", "ist",
];
const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ic", "ary",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify"];

/// Closed-class and common-word lookup, first list wins on overlap
static LEXICON: Lazy<HashMap<&'static str, GrammaticalTag>> = Lazy::new(|| {
    let lists: [(&[&str], GrammaticalTag); 9] = [
        (PRONOUNS, GrammaticalTag::Pronoun),
        (DETERMINERS, GrammaticalTag::Determiner),
        (CONJUNCTIONS, GrammaticalTag::Conjunction),
        (PREPOSITIONS, GrammaticalTag::Preposition),
        (AUXILIARIES, GrammaticalTag::Verb),
        (INTERJECTIONS, GrammaticalTag::Interjection),
        (ADVERBS, GrammaticalTag::Adverb),
        (ADJECTIVES, GrammaticalTag::Adjective),
        (IRREGULAR_VERB_FORMS, GrammaticalTag::Verb),
    ];

    let mut map = HashMap::new();
    for (words, tag) in lists {
        for word in words {
            map.entry(*word).or_insert(tag);
        }
    }
    map
});

static VERB_BASES: Lazy<HashSet<&'static str>> = Lazy::new(|| VERBS.iter().copied().collect());

/// How a token's tag was decided, which controls whether context may override it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Evidence {
    /// Closed-class or listed word
    Lexical(GrammaticalTag),
    /// Inflection of a known verb; a noun after a determiner or adjective
    VerbInflection,
    /// Suffix rule
    Morphology(GrammaticalTag),
    /// No evidence; decided by context
    Unknown,
}

/// Rule-based English tagger
#[derive(Debug, Clone, Default)]
pub struct LexicalTagger;

impl LexicalTagger {
    pub fn new() -> Self {
        Self
    }

    fn evidence(word: &str) -> Evidence {
        if word.chars().all(|c| c.is_numeric()) {
            return Evidence::Lexical(GrammaticalTag::Number);
        }
        if !word.chars().any(|c| c.is_alphanumeric()) {
            return Evidence::Lexical(GrammaticalTag::Punctuation);
        }
        if let Some(tag) = LEXICON.get(word) {
            return Evidence::Lexical(*tag);
        }
        if let Some(entry) = Lexicon::contractions().get(word) {
            let tag = match entry.primary() {
                Category::Pronouns => GrammaticalTag::Pronoun,
                Category::Adverbs => GrammaticalTag::Adverb,
                _ => GrammaticalTag::Verb,
            };
            return Evidence::Lexical(tag);
        }
        if let Some((base, _)) = word.split_once('\'') {
            if word.ends_with("n't") {
                return Evidence::Lexical(GrammaticalTag::Verb);
            }
            // Possessive or clitic: judge by the base word
            return match Self::evidence(base) {
                Evidence::Lexical(tag) => Evidence::Lexical(tag),
                _ => Evidence::Morphology(GrammaticalTag::Noun),
            };
        }
        if VERB_BASES.contains(word) || verb_lemma(word).is_some() {
            return Evidence::VerbInflection;
        }
        let chars = word.chars().count();
        if chars > 4 && word.ends_with("ly") {
            return Evidence::Morphology(GrammaticalTag::Adverb);
        }
        if chars > 4 && NOUN_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Evidence::Morphology(GrammaticalTag::Noun);
        }
        if chars > 4 && ADJECTIVE_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Evidence::Morphology(GrammaticalTag::Adjective);
        }
        if chars > 4 && VERB_SUFFIXES.iter().any(|s| word.ends_with(s)) {
            return Evidence::Morphology(GrammaticalTag::Verb);
        }
        if chars > 4 && (word.ends_with("ing") || word.ends_with("ed")) {
            return Evidence::Morphology(GrammaticalTag::Verb);
        }
        Evidence::Unknown
    }

    /// Resolve a token using the previous token's tag
    fn resolve(word: &str, evidence: Evidence, previous: Option<GrammaticalTag>) -> GrammaticalTag {
        use GrammaticalTag::*;

        let after_nominal_modifier = matches!(previous, Some(Determiner) | Some(Adjective));
        match evidence {
            Evidence::Lexical(tag) | Evidence::Morphology(tag) => tag,
            Evidence::VerbInflection if after_nominal_modifier => Noun,
            Evidence::VerbInflection => Verb,
            Evidence::Unknown => match previous {
                // "fox jumps": third-person -s after a nominal
                Some(Noun) | Some(Pronoun)
                    if word.ends_with('s') && !word.ends_with("ss") && word.len() > 2 =>
                {
                    Verb
                }
                _ => Noun,
            },
        }
    }
}

impl Tagger for LexicalTagger {
    fn tag_text(&self, text: &str) -> Result<TaggedDocument> {
        let normalized = normalize(text);
        let mut tokens = Vec::new();
        let mut previous: Option<GrammaticalTag> = None;

        for m in TOKEN.find_iter(&normalized) {
            let word = m.as_str();
            let tag = Self::resolve(word, Self::evidence(word), previous);

            // Sentence punctuation resets context; commas and quotes don't
            previous = match tag {
                GrammaticalTag::Punctuation if matches!(word, "." | "!" | "?" | ";" | ":") => None,
                GrammaticalTag::Punctuation => previous,
                _ => Some(tag),
            };

            tokens.push(TaggedToken {
                text: word.to_string(),
                tag,
            });
        }

        Ok(TaggedDocument::new(tokens))
    }
}

/// Base form for a regular inflection of a listed verb
fn verb_lemma(word: &str) -> Option<&'static str> {
    let mut candidates: Vec<String> = Vec::with_capacity(6);

    if let Some(stem) = word.strip_suffix("ies") {
        candidates.push(format!("{}y", stem));
    }
    if let Some(stem) = word.strip_suffix("es") {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s') {
        candidates.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix("ied") {
        candidates.push(format!("{}y", stem));
    }
    for suffix in ["ed", "ing"] {
        if let Some(stem) = word.strip_suffix(suffix) {
            candidates.push(stem.to_string());
            candidates.push(format!("{}e", stem));
            // running -> run, stopped -> stop
            let mut chars = stem.chars().rev();
            if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
                if a == b {
                    candidates.push(stem[..stem.len() - a.len_utf8()].to_string());
                }
            }
        }
    }
    if let Some(stem) = word.strip_suffix('d') {
        candidates.push(stem.to_string());
    }

    candidates
        .iter()
        .find_map(|c| VERB_BASES.get(c.as_str()).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(text: &str) -> Vec<(String, GrammaticalTag)> {
        LexicalTagger::new()
            .tag_text(text)
            .unwrap()
            .tokens
            .into_iter()
            .map(|t| (t.text, t.tag))
            .collect()
    }

    fn tag_of(text: &str, word: &str) -> GrammaticalTag {
        tags(text)
            .into_iter()
            .find(|(w, _)| w == word)
            .map(|(_, t)| t)
            .unwrap_or_else(|| panic!("{} not tagged in {:?}", word, text))
    }

    #[test]
    fn test_pangram() {
        let text = "The quick brown fox jumps over the lazy dog";
        assert_eq!(tag_of(text, "the"), GrammaticalTag::Determiner);
        assert_eq!(tag_of(text, "quick"), GrammaticalTag::Adjective);
        assert_eq!(tag_of(text, "brown"), GrammaticalTag::Adjective);
        assert_eq!(tag_of(text, "fox"), GrammaticalTag::Noun);
        assert_eq!(tag_of(text, "jumps"), GrammaticalTag::Verb);
        assert_eq!(tag_of(text, "over"), GrammaticalTag::Preposition);
        assert_eq!(tag_of(text, "lazy"), GrammaticalTag::Adjective);
        assert_eq!(tag_of(text, "dog"), GrammaticalTag::Noun);
    }

    #[test]
    fn test_verb_inflection_after_determiner_is_noun() {
        assert_eq!(tag_of("She walks home", "walks"), GrammaticalTag::Verb);
        assert_eq!(tag_of("The walks were long", "walks"), GrammaticalTag::Noun);
    }

    #[test]
    fn test_morphology() {
        assert_eq!(tag_of("she sang beautifully", "beautifully"), GrammaticalTag::Adverb);
        assert_eq!(tag_of("a happiness", "happiness"), GrammaticalTag::Noun);
        assert_eq!(tag_of("a dangerous road", "dangerous"), GrammaticalTag::Adjective);
        assert_eq!(tag_of("they organize", "organize"), GrammaticalTag::Verb);
    }

    #[test]
    fn test_verb_lemma() {
        assert_eq!(verb_lemma("running"), Some("run"));
        assert_eq!(verb_lemma("liked"), Some("like"));
        assert_eq!(verb_lemma("studies"), Some("study"));
        assert_eq!(verb_lemma("watches"), Some("watch"));
        assert_eq!(verb_lemma("table"), None);
    }

    #[test]
    fn test_punctuation_and_numbers() {
        let tagged = tags("Wow! 42 cats.");
        assert!(tagged.contains(&("!".to_string(), GrammaticalTag::Punctuation)));
        assert!(tagged.contains(&("42".to_string(), GrammaticalTag::Number)));
        assert!(tagged.contains(&("wow".to_string(), GrammaticalTag::Interjection)));
    }

    #[test]
    fn test_contractions_keep_apostrophe() {
        assert_eq!(tag_of("I don\u{2019}t know", "don't"), GrammaticalTag::Verb);
        assert_eq!(tag_of("I'm here", "i'm"), GrammaticalTag::Pronoun);
        assert_eq!(tag_of("the cat's toy", "cat's"), GrammaticalTag::Noun);
    }

    #[test]
    fn test_extract_is_unique_and_lowercase() {
        let tagger = LexicalTagger::new();
        let doc = tagger.tag_text("Dog and DOG and dog").unwrap();
        let nouns = tagger.extract_by_tag(&doc, GrammaticalTag::Noun).unwrap();
        assert_eq!(nouns, vec!["dog"]);
    }

    #[test]
    fn test_empty_text() {
        let doc = LexicalTagger::new().tag_text("").unwrap();
        assert!(doc.tokens.is_empty());
        assert!(doc.extract(GrammaticalTag::Noun).is_empty());
    }
}
