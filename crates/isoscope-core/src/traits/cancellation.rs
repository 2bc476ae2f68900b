//! Cancellation for long fits and scoring passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled by `IsolationForest::fit_cancellable` before each tree and by
/// `score_cancellable` before each observation. Either call then returns
/// `ForestError::Cancelled` and no partial forest or score table escapes.
pub trait Cancellable {
    /// True once a caller asked the running fit or score to stop.
    fn is_cancelled(&self) -> bool;

    /// Ask every fit or score holding this handle to stop.
    fn cancel(&self);
}

/// Shared stop flag; clones observe the same state, so one clone can be
/// handed to rayon workers while another stays with the caller.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}
