//! Out-of-thread execution context
//!
//! A dedicated OS thread that turns requests into replies. It keeps no
//! state between requests and shares nothing with the caller beyond the two
//! channels.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, error};

use super::{ClassificationReply, ClassificationRequest, RouterMessage};
use crate::syntax::{Analyze, SyntaxAnalysis};

/// Spawn the worker thread
pub(super) fn spawn<A: Analyze>(
    analyzer: A,
    requests: mpsc::Receiver<ClassificationRequest>,
    replies: mpsc::UnboundedSender<RouterMessage>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("syntax-worker".to_string())
        .spawn(move || run(analyzer, requests, replies))
}

fn run<A: Analyze>(
    analyzer: A,
    mut requests: mpsc::Receiver<ClassificationRequest>,
    replies: mpsc::UnboundedSender<RouterMessage>,
) {
    debug!("Syntax worker started");

    while let Some(request) = requests.blocking_recv() {
        let analysis = catch_unwind(AssertUnwindSafe(|| analyzer.analyze(&request.text)));

        let result = match analysis {
            Ok(result) => result,
            Err(panic_err) => {
                let panic_msg = panic_err
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic_err.downcast_ref::<String>().map(|s| s.as_str()))
                    .unwrap_or("unknown panic");
                error!("Classification of request {} panicked: {}", request.id, panic_msg);
                SyntaxAnalysis::empty()
            }
        };

        let reply = ClassificationReply {
            id: request.id,
            key: request.key,
            result,
        };
        if replies.send(RouterMessage::Completed(reply)).is_err() {
            break;
        }
    }

    debug!("Syntax worker exiting");
}
