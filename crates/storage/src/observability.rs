//! Structured logging for model operations.
//!
//! Same `track_operation`/`OperationType` shape used elsewhere in this
//! crate's ancestry, trimmed to `tracing` only: this store has no
//! long-running backend worth a metrics registry, so paired `metrics`
//! counters/histograms are dropped and `tracing`'s spans carry latency
//! instead.

use std::time::Instant;
use tracing::{debug, error, instrument};

/// A mutation or query kind worth tracing uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationType {
    Add,
    Remove,
    Erase,
    Find,
    Contains,
    Ask,
    Count,
    Ingest,
}

impl OperationType {
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::Add => "model.add",
            OperationType::Remove => "model.remove",
            OperationType::Erase => "model.erase",
            OperationType::Find => "model.find",
            OperationType::Contains => "model.contains",
            OperationType::Ask => "model.ask",
            OperationType::Count => "model.count",
            OperationType::Ingest => "model.ingest",
        }
    }
}

/// Run `f`, tracing its outcome and latency under `op`'s name.
#[instrument(level = "debug", skip(f), fields(op = op.name()))]
pub fn track_operation<F, T, E>(op: OperationType, f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
    E: std::fmt::Debug,
{
    let start = Instant::now();
    let result = f();
    let latency_us = start.elapsed().as_micros();

    match &result {
        Ok(_) => debug!(op = op.name(), latency_us, "operation completed"),
        Err(e) => error!(op = op.name(), latency_us, error = ?e, "operation failed"),
    }

    result
}
