//! In-memory multi-index RDF quad store
//!
//! Twelve lexicographic quad orderings, a signature-based query planner, and
//! a range/filter iterator over a shared [`rdf_model::World`] of interned
//! terms. Surface syntax (Turtle/N-Triples), on-disk persistence,
//! transactions, concurrent mutation, SPARQL evaluation, and reasoning are
//! all out of scope — this crate is the core a syntax reader feeds and a
//! query layer sits on top of.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use rdf_model::{Quad, TermId, World};
//! use storage::{IndexFlags, Model};
//!
//! let world = Rc::new(World::new());
//! let mut model = Model::new(world.clone(), IndexFlags::NONE);
//!
//! let s = world.get_uri("http://example.org/s").unwrap();
//! let p = world.get_uri("http://example.org/p").unwrap();
//! let o = world.get_uri("http://example.org/o").unwrap();
//! model.add(Quad::triple(s, p, o)).unwrap();
//!
//! let pattern = Quad::new(s, TermId::NULL, TermId::NULL, TermId::NULL);
//! assert!(model.ask(&pattern));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod egress;
mod error;
mod indexes;
mod iter;
mod model;
mod observability;
mod planner;
mod sink;

pub use egress::iter_events;
pub use error::{StorageError, StorageResult};
pub use indexes::{IndexFlags, IndexOrder};
pub use iter::QuadIter;
pub use model::Model;
pub use observability::{track_operation, OperationType};
pub use planner::{Plan, SearchMode};
pub use sink::{IngestionSink, ModelSink, NodeEvent, StatementEvent};

use rdf_model::{Quad, TermId};

/// Handle-only quad comparison with null treated as a wildcard on either
/// side — unlike [`Quad::matches`], which
/// only treats `pattern`'s nulls as wildcards, this is symmetric.
pub fn quad_match(a: &Quad, b: &Quad) -> bool {
    fn pos_match(x: TermId, y: TermId) -> bool {
        x.is_null() || y.is_null() || x == y
    }
    pos_match(a.s, b.s) && pos_match(a.p, b.p) && pos_match(a.o, b.o) && pos_match(a.g, b.g)
}
