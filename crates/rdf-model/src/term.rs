//! Term handles and term data.
//!
//! A [`TermId`] is an opaque handle into a [`crate::World`]'s term table.
//! Handle equality is semantic equality: two terms compare equal iff their
//! `TermId`s are equal, which is why the dictionary never hands out two
//! different ids for the same URI, blank node label, or (lexical form,
//! datatype, language) literal triple.

use std::rc::Rc;

/// Opaque handle to an interned term.
///
/// `TermId(0)` is reserved as the null handle: it never identifies a real
/// term. It is reused as a wildcard in query patterns and as the sentinel
/// for the default (unnamed) graph in a [`crate::Quad`]. Ordinary integer
/// ordering already sorts null before every real id, since real ids start
/// at 1 and are assigned by a monotonically increasing counter that is
/// never recycled.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct TermId(u32);

impl TermId {
    /// The null handle: wildcard in patterns, default graph in quads.
    pub const NULL: TermId = TermId(0);

    pub(crate) fn new(raw: u32) -> Self {
        debug_assert!(raw != 0, "TermId 0 is reserved for NULL");
        TermId(raw)
    }

    /// True if this is the null handle.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub(crate) fn index(self) -> usize {
        debug_assert!(!self.is_null());
        (self.0 - 1) as usize
    }
}

/// The three term kinds this store recognizes. RDF-star quoted triples and
/// SPARQL-style variables are out of scope.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum TermKind {
    Uri,
    Blank,
    Literal,
}

/// A snapshot of a term's data, returned by [`crate::World::term`].
///
/// `datatype` and `language` are only ever `Some` for `Literal` terms;
/// datatype terms are themselves always `Uri` terms, never `Literal` (this
/// is what rules out reference cycles through the datatype slot, since a
/// literal can never be its own datatype).
#[derive(Clone, Debug)]
pub struct Term {
    pub kind: TermKind,
    pub lexical: Rc<str>,
    pub datatype: Option<TermId>,
    pub language: Option<Rc<str>>,
}

impl Term {
    pub fn is_uri(&self) -> bool {
        matches!(self.kind, TermKind::Uri)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, TermKind::Blank)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, TermKind::Literal)
    }
}

#[derive(Clone)]
pub(crate) struct TermData {
    pub kind: TermKind,
    pub lexical: Rc<str>,
    pub datatype: TermId,
    pub language: Option<Rc<str>>,
}

#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct LiteralKey {
    pub lexical: Rc<str>,
    pub datatype: TermId,
    pub language: Option<Rc<str>>,
}
