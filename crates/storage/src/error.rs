//! Errors surfaced by the storage crate.

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in model operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An argument violated a precondition.
    #[error("bad argument: {0}")]
    BadArgument(String),

    /// An iterator was used after the model it was opened on mutated in a
    /// way other than advancing that same iterator via `erase`.
    #[error("stale iterator: model mutated since this iterator was opened")]
    StaleIterator,

    /// The allocator failed. No code path in this crate constructs this
    /// variant today — Rust's global allocator aborts rather than
    /// returning a recoverable error on allocation failure — but the
    /// variant is kept for API parity with the status-code surface this
    /// store's design is descended from.
    #[error("out of memory")]
    OutOfMemory,
}
