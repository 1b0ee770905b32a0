//! Interned RDF term dictionary and quad key.
//!
//! This crate provides the data model half of the quad store: term
//! interning and refcounting ([`World`]) and the quad key
//! ([`Quad`]). It has no notion of indices, query planning, or iteration —
//! that lives in the `storage` crate, built on top of the handles this
//! crate hands out.
//!
//! Single-threaded: a [`World`] uses `RefCell`/`Cell` internally and is not
//! `Sync`. Callers needing concurrent access serialize externally.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod quad;
mod term;
mod vocab;
mod world;

pub use quad::{Quad, QuadPos};
pub use term::{Term, TermId, TermKind};
pub use vocab::Vocabulary;
pub use world::{ErrorSeverity, World};

/// Errors that can occur when working with terms.
#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    /// An argument violated a precondition (e.g. an empty URI).
    #[error("bad argument: {0}")]
    BadArgument(String),
}

/// Result type for RDF model operations.
pub type Result<T> = std::result::Result<T, RdfError>;
