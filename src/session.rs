//! Editor-facing classification session
//!
//! Ties the pieces together for one document: edits are debounced, settled
//! text goes to the dispatcher, and replies are merged into the accumulated
//! state on the task that owns the session. Renderers read [`EditorSession::sets`].
//!
//! Failed classifications (timeout, worker gone) leave the state untouched.
//! Clearing bumps a generation counter; replies to requests issued before the
//! clear are discarded.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::config::SyntaxConfig;
use crate::dispatch::debounce::{Debouncer, Settled};
use crate::dispatch::Dispatcher;
use crate::error::{Result, SyntaxError};
use crate::syntax::{
    load_state, save_state, Accumulator, AccumulatedSyntaxState, Analyze, Breakdown, Classifier,
    ProjectionCache, SyntaxAnalysis, SyntaxSets,
};

/// What a call to [`EditorSession::next_event`] did
#[derive(Debug)]
pub enum SessionEvent {
    /// Settled text was handed to the dispatcher
    Dispatched,
    /// A reply was merged; `changed` is false when it added nothing new
    Merged { changed: bool },
    /// A request failed and was discarded
    Failed(SyntaxError),
    /// A reply for text from before the last clear was dropped
    Discarded,
}

/// Reply tagged with the generation it was requested in
type TaggedResult = (u64, Result<SyntaxAnalysis>);

pub struct EditorSession {
    dispatcher: Dispatcher,
    accumulator: Accumulator,
    projection: ProjectionCache,
    debouncer: Debouncer<String>,
    settled_rx: Settled<String>,
    results_tx: mpsc::UnboundedSender<TaggedResult>,
    results_rx: mpsc::UnboundedReceiver<TaggedResult>,
    text: String,
    generation: u64,
}

impl EditorSession {
    /// New session with a closed dispatcher
    pub fn new(config: SyntaxConfig) -> Self {
        let (debouncer, settled_rx) = Debouncer::new(config.debounce());
        let (results_tx, results_rx) = mpsc::unbounded_channel();

        Self {
            dispatcher: Dispatcher::new(config),
            accumulator: Accumulator::new(),
            projection: ProjectionCache::new(),
            debouncer,
            settled_rx,
            results_tx,
            results_rx,
            text: String::new(),
            generation: 0,
        }
    }

    /// Open the dispatcher with the bundled classifier
    pub fn open(&mut self) -> Result<()> {
        self.open_with(Classifier::new())
    }

    pub fn open_with<A: Analyze>(&mut self, analyzer: A) -> Result<()> {
        self.dispatcher.open(analyzer)
    }

    pub fn is_open(&self) -> bool {
        self.dispatcher.is_open()
    }

    pub fn close(&mut self) {
        self.debouncer.cancel();
        self.dispatcher.close();
    }

    /// Record an edit; classification follows after the quiet period
    pub fn text_changed(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.debouncer.schedule(self.text.clone());
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wait for the next settled edit or reply and handle it
    pub async fn next_event(&mut self) -> SessionEvent {
        tokio::select! {
            Some(text) = self.settled_rx.recv() => {
                self.dispatch(text);
                SessionEvent::Dispatched
            }
            Some((generation, result)) = self.results_rx.recv() => {
                self.absorb(generation, result)
            }
        }
    }

    /// Classify `text` immediately, bypassing the debounce
    ///
    /// Returns whether the accumulated state changed.
    pub async fn analyze_now(&mut self, text: &str) -> Result<bool> {
        let analysis = self.dispatcher.submit(text).await?;
        Ok(self.accumulator.apply(&analysis))
    }

    fn dispatch(&self, text: String) {
        let Some(handle) = self.dispatcher.handle() else {
            debug!("Dispatcher closed, skipping classification");
            return;
        };

        let results_tx = self.results_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let result = handle.submit(text).await;
            // Session may be gone by now
            let _ = results_tx.send((generation, result));
        });
    }

    fn absorb(&mut self, generation: u64, result: Result<SyntaxAnalysis>) -> SessionEvent {
        if generation != self.generation {
            debug!("Dropping reply from before the last clear");
            return SessionEvent::Discarded;
        }

        match result {
            Ok(analysis) => SessionEvent::Merged {
                changed: self.accumulator.apply(&analysis),
            },
            Err(SyntaxError::Closed) => {
                debug!("Classification abandoned, dispatcher closed");
                SessionEvent::Failed(SyntaxError::Closed)
            }
            Err(e) => {
                warn!("Classification failed, keeping previous state: {}", e);
                SessionEvent::Failed(e)
            }
        }
    }

    pub fn state(&self) -> &AccumulatedSyntaxState {
        self.accumulator.state()
    }

    pub fn revision(&self) -> u64 {
        self.accumulator.revision()
    }

    /// Membership sets for the renderer, rebuilt only after state changes
    pub fn sets(&mut self) -> Arc<SyntaxSets> {
        self.projection.get(&self.accumulator)
    }

    /// Category counts for the current text
    pub fn breakdown(&mut self) -> Breakdown {
        let sets = self.sets();
        sets.breakdown(&self.text)
    }

    /// Reset the document ("clear document")
    ///
    /// Pending edits are cancelled and in-flight replies will be discarded.
    pub fn clear(&mut self) {
        self.debouncer.cancel();
        self.text.clear();
        self.generation += 1;
        self.accumulator.clear();
        info!("Syntax state cleared");
    }

    /// Merge a previously persisted state
    pub fn restore(&mut self, state: &AccumulatedSyntaxState) -> bool {
        self.accumulator.restore(state)
    }

    pub fn load(&mut self, path: &Path) -> Result<bool> {
        let state = load_state(path)?;
        Ok(self.restore(&state))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_state(path, self.state())
    }
}
