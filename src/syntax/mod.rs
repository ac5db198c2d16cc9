//! Part-of-speech classification for live editor highlighting
//!
//! ## Pipeline
//!
//! ```text
//! text ──▶ Classifier ──▶ SyntaxAnalysis ──merge──▶ Accumulator ──▶ SyntaxSets
//!           │  tagger (noun, verb, adjective, adverb,      │            │
//!           │          pronoun, conjunction, preposition)  │            └─ has(category, word)
//!           │  lexicons (articles, prepositions,           └─ save_state / load_state
//!           │            interjections)
//!           └─ contraction expander
//! ```
//!
//! Classification runs off the UI thread (see [`crate::dispatch`]). Its results
//! are folded into an append-only [`AccumulatedSyntaxState`] that only an
//! explicit clear resets, and the render path reads the O(1)
//! [`SyntaxSets`] projection.
//!
//! ## Usage
//!
//! ```rust
//! use typewriter_core::syntax::{Accumulator, Category, Classifier, project};
//!
//! let classifier = Classifier::new();
//! let mut accumulator = Accumulator::new();
//! accumulator.apply(&classifier.classify("The dog barks"));
//!
//! let sets = project(accumulator.state());
//! assert!(sets.has(Category::Articles, "the"));
//! ```

pub mod accumulator;
pub mod analysis;
pub mod cache;
pub mod category;
pub mod classifier;
pub mod contractions;
pub mod lexicon;
pub mod normalize;
pub mod persistence;
pub mod projection;
pub mod tagger;

pub use accumulator::{merge, Accumulator};
pub use analysis::{AccumulatedSyntaxState, SyntaxAnalysis};
pub use cache::{CacheStats, ClassificationCache};
pub use category::Category;
pub use classifier::{Analyze, Classifier};
pub use persistence::{load_state, save_state};
pub use projection::{project, Breakdown, ProjectionCache, SyntaxSets};
pub use tagger::{GrammaticalTag, LexicalTagger, TaggedDocument, TaggedToken, Tagger};
