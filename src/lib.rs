//! Typewriter - live part-of-speech highlighting engine
//!
//! Classifies the words of a document into nine categories as it is typed
//! and keeps a never-shrinking record of what has been seen, for colour
//! highlighting and a word-count breakdown.
//!
//! # Architecture
//!
//! - **Syntax**: classification, accumulation, projection and persistence
//! - **Dispatch**: off-thread execution with debounce and per-request deadlines
//! - **Session**: one document's edit → classify → merge loop
//!
//! # Example
//!
//! ```ignore
//! use typewriter_core::{EditorSession, SyntaxConfig, Category};
//!
//! #[tokio::main]
//! async fn main() -> typewriter_core::Result<()> {
//!     let mut session = EditorSession::new(SyntaxConfig::default());
//!     session.open()?;
//!
//!     session.text_changed("The quick brown fox");
//!     session.next_event().await; // dispatched
//!     session.next_event().await; // merged
//!
//!     assert!(session.sets().has(Category::Articles, "the"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod session;
pub mod syntax;

pub use config::SyntaxConfig;
pub use dispatch::{DispatchHandle, DispatchStatus, Dispatcher};
pub use error::{Result, SyntaxError};
pub use session::{EditorSession, SessionEvent};
pub use syntax::{
    AccumulatedSyntaxState, Accumulator, Analyze, Breakdown, Category, Classifier,
    SyntaxAnalysis, SyntaxSets,
};
