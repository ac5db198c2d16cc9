//! Request dispatch to the out-of-thread classifier
//!
//! Architecture:
//! ```text
//! DispatchHandle::submit ──Submit──▶ router task ──try_send──▶ worker thread
//!        ▲                             │   ▲                       │
//!        └──────── oneshot ────────────┘   └────── Completed ──────┘
//! ```
//!
//! The router task owns all bookkeeping: the map of pending request ids to
//! their reply senders, and the classification cache. Handles never touch
//! either directly, they send messages. The worker holds nothing between
//! requests.
//! A request registers with the router before it reaches the worker, so a
//! reply can never arrive for an id the router has not seen.
//!
//! Each submit races its reply against the configured deadline. On expiry
//! the caller gets [`SyntaxError::Timeout`] and the router forgets the id;
//! a reply that shows up later is dropped.

pub mod debounce;
mod worker;

use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::SyntaxConfig;
use crate::error::{Result, SyntaxError};
use crate::syntax::cache::{ClassificationCache, ContentHash};
use crate::syntax::{Analyze, SyntaxAnalysis};

/// Request sent to the worker
#[derive(Debug, Clone)]
pub struct ClassificationRequest {
    pub id: u64,
    pub key: ContentHash,
    pub text: String,
}

/// Reply sent back by the worker
#[derive(Debug, Clone)]
pub struct ClassificationReply {
    pub id: u64,
    pub key: ContentHash,
    pub result: SyntaxAnalysis,
}

/// Snapshot of router bookkeeping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DispatchStatus {
    /// Requests awaiting a reply
    pub pending: usize,
    /// Highest id seen
    pub last_id: u64,
    /// Replies handed to a waiting caller
    pub delivered: u64,
    /// Replies that arrived after their request expired
    pub stale: u64,
    /// Submissions answered from the cache without reaching the worker
    pub cache_hits: u64,
}

type ReplySender = oneshot::Sender<Result<SyntaxAnalysis>>;

pub(crate) enum RouterMessage {
    Submit {
        id: u64,
        text: String,
        reply: ReplySender,
    },
    Completed(ClassificationReply),
    Expire {
        id: u64,
    },
    Status(oneshot::Sender<DispatchStatus>),
    Shutdown,
}

/// Cloneable submission endpoint of an open [`Dispatcher`]
#[derive(Clone, Debug)]
pub struct DispatchHandle {
    router_tx: mpsc::UnboundedSender<RouterMessage>,
    next_id: Arc<AtomicU64>,
    timeout: Duration,
}

impl DispatchHandle {
    /// Classify `text` on the worker, waiting at most the configured timeout
    pub async fn submit(&self, text: impl Into<String>) -> Result<SyntaxAnalysis> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let (reply_tx, reply_rx) = oneshot::channel();

        self.router_tx
            .send(RouterMessage::Submit {
                id,
                text: text.into(),
                reply: reply_tx,
            })
            .map_err(|_| SyntaxError::Closed)?;

        match tokio::time::timeout(self.timeout, reply_rx).await {
            Ok(Ok(result)) => result,
            // Sender dropped without a reply: the router shut down
            Ok(Err(_)) => Err(SyntaxError::Closed),
            Err(_) => {
                let _ = self.router_tx.send(RouterMessage::Expire { id });
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!("Classification request {} timed out after {}ms", id, timeout_ms);
                Err(SyntaxError::Timeout { id, timeout_ms })
            }
        }
    }

    pub async fn status(&self) -> Result<DispatchStatus> {
        let (tx, rx) = oneshot::channel();
        self.router_tx
            .send(RouterMessage::Status(tx))
            .map_err(|_| SyntaxError::Closed)?;
        rx.await.map_err(|_| SyntaxError::Closed)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

struct Running {
    handle: DispatchHandle,
    router: JoinHandle<()>,
}

/// Owner of the worker thread and router task
///
/// Created closed; [`Dispatcher::open`] starts both, [`Dispatcher::close`]
/// (or drop) stops them. Submitting while closed yields an empty analysis.
pub struct Dispatcher {
    config: SyntaxConfig,
    running: Option<Running>,
}

impl Dispatcher {
    pub fn new(config: SyntaxConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }

    pub fn config(&self) -> &SyntaxConfig {
        &self.config
    }

    /// Start the worker with `analyzer`
    ///
    /// The router runs on the current tokio runtime; without one this fails
    /// and the dispatcher stays closed.
    pub fn open<A: Analyze>(&mut self, analyzer: A) -> Result<()> {
        if self.running.is_some() {
            debug!("Dispatcher already open");
            return Ok(());
        }

        let runtime = Handle::try_current()
            .map_err(|e| SyntaxError::Other(format!("Dispatcher needs a tokio runtime: {}", e)))?;

        let (router_tx, router_rx) = mpsc::unbounded_channel();
        let (worker_tx, worker_rx) = mpsc::channel(self.config.request_capacity);

        worker::spawn(analyzer, worker_rx, router_tx.clone())?;
        let router = runtime.spawn(route(
            router_rx,
            worker_tx,
            ClassificationCache::new(self.config.cache_capacity),
            self.config.request_capacity,
        ));

        self.running = Some(Running {
            handle: DispatchHandle {
                router_tx,
                next_id: Arc::new(AtomicU64::new(0)),
                timeout: self.config.timeout(),
            },
            router,
        });

        info!(
            "Syntax dispatcher open (timeout {}ms, queue {})",
            self.config.timeout_ms, self.config.request_capacity
        );
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.running.is_some()
    }

    /// Submission handle, if open
    pub fn handle(&self) -> Option<DispatchHandle> {
        self.running.as_ref().map(|r| r.handle.clone())
    }

    /// Classify `text`; an empty analysis when closed
    pub async fn submit(&self, text: impl Into<String>) -> Result<SyntaxAnalysis> {
        match &self.running {
            Some(running) => running.handle.submit(text).await,
            None => Ok(SyntaxAnalysis::empty()),
        }
    }

    /// Stop the router and let the worker drain; pending callers see `Closed`
    pub fn close(&mut self) {
        let Some(running) = self.running.take() else {
            return;
        };

        if running.handle.router_tx.send(RouterMessage::Shutdown).is_err() {
            // Router already gone
            running.router.abort();
        }
        info!("Syntax dispatcher closed");
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        self.close();
    }
}

async fn route(
    mut inbox: mpsc::UnboundedReceiver<RouterMessage>,
    worker_tx: mpsc::Sender<ClassificationRequest>,
    mut cache: ClassificationCache,
    capacity: usize,
) {
    let mut pending: HashMap<u64, ReplySender> = HashMap::new();
    let mut status = DispatchStatus::default();

    while let Some(message) = inbox.recv().await {
        match message {
            RouterMessage::Submit { id, text, reply } => {
                status.last_id = status.last_id.max(id);

                let key = ContentHash::from_content(&text);
                if let Some(hit) = cache.lookup(key) {
                    status.cache_hits += 1;
                    let _ = reply.send(Ok(hit));
                    continue;
                }

                let request = ClassificationRequest { id, key, text };
                match worker_tx.try_send(request) {
                    Ok(()) => {
                        pending.insert(id, reply);
                    }
                    Err(TrySendError::Full(_)) => {
                        warn!("Worker queue full, rejecting request {}", id);
                        let _ = reply.send(Err(SyntaxError::Overloaded(capacity)));
                    }
                    Err(TrySendError::Closed(_)) => {
                        let _ = reply.send(Err(SyntaxError::Closed));
                    }
                }
            }
            RouterMessage::Completed(reply) => {
                // Late replies are still valid classifications of their text
                cache.store(reply.key, &reply.result);

                match pending.remove(&reply.id) {
                    Some(tx) => {
                        if tx.send(Ok(reply.result)).is_err() {
                            debug!("Caller for request {} went away", reply.id);
                        }
                        status.delivered += 1;
                    }
                    None => {
                        debug!("Dropping stale reply for request {}", reply.id);
                        status.stale += 1;
                    }
                }
            }
            RouterMessage::Expire { id } => {
                if pending.remove(&id).is_some() {
                    debug!("Request {} expired", id);
                }
            }
            RouterMessage::Status(tx) => {
                let _ = tx.send(DispatchStatus {
                    pending: pending.len(),
                    ..status
                });
            }
            RouterMessage::Shutdown => {
                if !pending.is_empty() {
                    debug!("Discarding {} pending requests", pending.len());
                }
                break;
            }
        }
    }
    // Dropping worker_tx ends the worker loop; dropping pending releases callers
}
