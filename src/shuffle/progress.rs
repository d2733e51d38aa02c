use std::fmt;

use crate::error::{ServiceError, ShuffleError};

/// Stage of a shuffle run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Fetch,
    Shuffle,
    Remove,
    Add,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Fetch => "fetch",
            Phase::Shuffle => "shuffle",
            Phase::Remove => "remove",
            Phase::Add => "add",
        };
        f.write_str(name)
    }
}

/// Receives progress events from a shuffle run.
///
/// All methods default to doing nothing so an observer only implements what
/// it wants to display. For `Phase::Fetch` the number of batches is not known
/// up front and is reported as `0`.
pub trait ProgressObserver: Send + Sync {
    fn on_phase_start(&self, _phase: Phase, _batches: usize) {}

    fn on_batch_done(&self, _phase: Phase, _batch: usize, _batches: usize) {}

    /// A transient failure on `attempt` that will be retried after the policy delay.
    fn on_retry(&self, _operation: &str, _attempt: u32, _error: &ServiceError) {}

    fn on_fatal_error(&self, _error: &ShuffleError) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}
