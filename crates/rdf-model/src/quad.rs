//! The quad key: four interned term handles.

use std::fmt;

use crate::term::TermId;

/// The four positions of a quad.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum QuadPos {
    Subject,
    Predicate,
    Object,
    Graph,
}

/// A quad: subject, predicate, object, and graph handles.
///
/// `graph == TermId::NULL` is the default (unnamed) graph, which is also
/// what gives triple semantics. The same null handle doubles as the
/// wildcard used in search patterns (see [`Quad::matches`]); the two
/// meanings are disambiguated by context — a stored quad's graph field
/// means "default graph", a pattern's graph field means "any graph".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Quad {
    pub s: TermId,
    pub p: TermId,
    pub o: TermId,
    pub g: TermId,
}

impl Quad {
    pub fn new(s: TermId, p: TermId, o: TermId, g: TermId) -> Self {
        Quad { s, p, o, g }
    }

    /// A triple: same as `new` with the default graph.
    pub fn triple(s: TermId, p: TermId, o: TermId) -> Self {
        Quad { s, p, o, g: TermId::NULL }
    }

    pub fn is_default_graph(&self) -> bool {
        self.g.is_null()
    }

    /// Array form in subject-predicate-object-graph order: position 0 of
    /// the permutation table.
    pub fn as_array(&self) -> [TermId; 4] {
        [self.s, self.p, self.o, self.g]
    }

    pub fn from_array(a: [TermId; 4]) -> Self {
        Quad { s: a[0], p: a[1], o: a[2], g: a[3] }
    }

    pub fn get(&self, pos: QuadPos) -> TermId {
        match pos {
            QuadPos::Subject => self.s,
            QuadPos::Predicate => self.p,
            QuadPos::Object => self.o,
            QuadPos::Graph => self.g,
        }
    }

    /// Pattern match: each non-null field of `pattern` must equal the
    /// corresponding field of `self`; null fields in `pattern` are
    /// wildcards.
    pub fn matches(&self, pattern: &Quad) -> bool {
        (pattern.s.is_null() || pattern.s == self.s)
            && (pattern.p.is_null() || pattern.p == self.p)
            && (pattern.o.is_null() || pattern.o == self.o)
            && (pattern.g.is_null() || pattern.g == self.g)
    }
}

impl fmt::Display for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}, {:?}, {:?})", self.s, self.p, self.o, self.g)
    }
}
