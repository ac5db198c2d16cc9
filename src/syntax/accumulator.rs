//! Monotonic accumulation of classification results
//!
//! `merge` is a per-category set union, so it is idempotent and
//! order-independent: overlapping requests may resolve in any order.

use std::collections::HashSet;
use tracing::debug;

use super::analysis::{AccumulatedSyntaxState, SyntaxAnalysis};
use super::category::Category;

/// Union `incoming` into `accumulated`, producing a new state
///
/// Existing entries keep their position; unseen words are appended.
pub fn merge(
    accumulated: &AccumulatedSyntaxState,
    incoming: &SyntaxAnalysis,
) -> AccumulatedSyntaxState {
    let mut merged = accumulated.clone().into_analysis();

    for category in Category::ALL {
        let list = merged.get_mut(category);
        let mut seen: HashSet<String> = list.iter().cloned().collect();
        for word in incoming.get(category) {
            if seen.insert(word.clone()) {
                list.push(word.clone());
            }
        }
    }

    AccumulatedSyntaxState::from_analysis(merged)
}

/// A state with all nine categories empty
pub fn clear() -> AccumulatedSyntaxState {
    AccumulatedSyntaxState::new()
}

/// Owner of the running state for one document session
///
/// The revision counter changes whenever the state does, which lets
/// projections memoize on it.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    state: AccumulatedSyntaxState,
    revision: u64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AccumulatedSyntaxState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Merge a classification result; returns whether anything new was added
    pub fn apply(&mut self, incoming: &SyntaxAnalysis) -> bool {
        let next = merge(&self.state, incoming);
        if next == self.state {
            return false;
        }

        debug!(
            "Accumulated {} new entries",
            next.total_words() - self.state.total_words()
        );
        self.state = next;
        self.revision += 1;
        true
    }

    /// Merge a previously persisted state (never replaces); entries are normalized
    pub fn restore(&mut self, persisted: &AccumulatedSyntaxState) -> bool {
        self.apply(&persisted.normalized())
    }

    /// Explicit "clear document"
    pub fn clear(&mut self) {
        self.state = clear();
        self.revision += 1;
    }
}
