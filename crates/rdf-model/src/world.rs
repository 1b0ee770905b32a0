//! Term dictionary: interning, lookup, and refcounting.
//!
//! `World` owns the single term table a set of [`crate::Quad`]-based models
//! shares. It is deliberately single-threaded — cooperative use only, no
//! internal synchronization — so interning and refcounting go through
//! `RefCell`/`Cell` rather than the `parking_lot::RwLock` a concurrent
//! dictionary would need.

use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::term::{LiteralKey, Term, TermData, TermId, TermKind};
use crate::RdfError;

/// Severity passed to a [`World`]'s error sink.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorSeverity {
    Warning,
    Error,
}

type ErrorSink = Box<dyn FnMut(ErrorSeverity, &str)>;

/// The term dictionary.
///
/// Interns URIs, blank node labels, and literals into small [`TermId`]
/// handles, and tracks how many quads currently reference each term. A
/// term's entry is freed once its refcount drops back to zero (mirrors
/// `sord_add_tuple_ref`/`sord_drop_tuple_ref` in the C original this store
/// is descended from: refcounts track tuple containment, not the number of
/// `TermId`s a caller happens to be holding).
pub struct World {
    terms: RefCell<Vec<Option<TermData>>>,
    refs: RefCell<Vec<u32>>,
    uris: RefCell<FxHashMap<Rc<str>, TermId>>,
    blanks: RefCell<FxHashMap<Rc<str>, TermId>>,
    literals: RefCell<FxHashMap<LiteralKey, TermId>>,
    free_list: RefCell<Vec<TermId>>,
    next_blank: Cell<u64>,
    error_sink: RefCell<Option<ErrorSink>>,
}

impl World {
    pub fn new() -> Self {
        Self {
            terms: RefCell::new(Vec::new()),
            refs: RefCell::new(Vec::new()),
            uris: RefCell::new(FxHashMap::default()),
            blanks: RefCell::new(FxHashMap::default()),
            literals: RefCell::new(FxHashMap::default()),
            free_list: RefCell::new(Vec::new()),
            next_blank: Cell::new(0),
            error_sink: RefCell::new(None),
        }
    }

    /// Install a callback invoked for diagnostics the store would otherwise
    /// only trace-log. Replaces any previously installed sink.
    pub fn set_error_sink(&self, sink: impl FnMut(ErrorSeverity, &str) + 'static) {
        *self.error_sink.borrow_mut() = Some(Box::new(sink));
    }

    /// Route a diagnostic through the installed error sink, or `tracing` if
    /// none is installed.
    pub fn report(&self, severity: ErrorSeverity, message: &str) {
        let mut sink = self.error_sink.borrow_mut();
        if let Some(sink) = sink.as_mut() {
            sink(severity, message);
        } else {
            match severity {
                ErrorSeverity::Warning => tracing::warn!(%message),
                ErrorSeverity::Error => tracing::error!(%message),
            }
        }
    }

    fn alloc(&self, data: TermData) -> TermId {
        if let Some(id) = self.free_list.borrow_mut().pop() {
            self.terms.borrow_mut()[id.index()] = Some(data);
            self.refs.borrow_mut()[id.index()] = 0;
            return id;
        }
        let mut terms = self.terms.borrow_mut();
        terms.push(Some(data));
        let id = TermId::new(terms.len() as u32);
        self.refs.borrow_mut().push(0);
        id
    }

    /// Look up or create the URI term for `iri`.
    pub fn get_uri(&self, iri: &str) -> Result<TermId, RdfError> {
        if iri.is_empty() {
            return Err(RdfError::BadArgument("URI must not be empty".into()));
        }
        if let Some(id) = self.uris.borrow().get(iri) {
            return Ok(*id);
        }
        let lexical: Rc<str> = Rc::from(iri);
        let id = self.alloc(TermData {
            kind: TermKind::Uri,
            lexical: lexical.clone(),
            datatype: TermId::NULL,
            language: None,
        });
        self.uris.borrow_mut().insert(lexical, id);
        Ok(id)
    }

    /// Look up or create the blank node term labelled `label`.
    pub fn get_blank(&self, label: &str) -> Result<TermId, RdfError> {
        if label.is_empty() {
            return Err(RdfError::BadArgument("blank node label must not be empty".into()));
        }
        if let Some(id) = self.blanks.borrow().get(label) {
            return Ok(*id);
        }
        let lexical: Rc<str> = Rc::from(label);
        let id = self.alloc(TermData {
            kind: TermKind::Blank,
            lexical: lexical.clone(),
            datatype: TermId::NULL,
            language: None,
        });
        self.blanks.borrow_mut().insert(lexical, id);
        Ok(id)
    }

    /// Mint a fresh blank node with a dictionary-generated label, guaranteed
    /// not to collide with any label obtained through [`World::get_blank`].
    pub fn fresh_blank(&self) -> TermId {
        loop {
            let n = self.next_blank.get();
            self.next_blank.set(n + 1);
            let label = format!("b{n}");
            if !self.blanks.borrow().contains_key(label.as_str()) {
                return self.get_blank(&label).expect("generated label is non-empty");
            }
        }
    }

    /// Look up or create a literal term.
    ///
    /// `datatype`, when given, must be a URI term; `language`, when given,
    /// implies the literal's datatype is `rdf:langString` semantics are the
    /// caller's responsibility (this layer does not enforce XSD datatype
    /// vocabulary). Equality is lexical form, datatype, and language taken
    /// together — no two of those being equal alone makes two literals the
    /// same term.
    pub fn get_literal(
        &self,
        lexical: &str,
        datatype: Option<TermId>,
        language: Option<&str>,
    ) -> Result<TermId, RdfError> {
        if let Some(dt) = datatype {
            if dt.is_null() || !matches!(self.kind(dt), Some(TermKind::Uri)) {
                return Err(RdfError::BadArgument("literal datatype must be a URI term".into()));
            }
        }
        let key = LiteralKey {
            lexical: Rc::from(lexical),
            datatype: datatype.unwrap_or(TermId::NULL),
            language: language.map(Rc::from),
        };
        if let Some(id) = self.literals.borrow().get(&key) {
            return Ok(*id);
        }
        let id = self.alloc(TermData {
            kind: TermKind::Literal,
            lexical: key.lexical.clone(),
            datatype: key.datatype,
            language: key.language.clone(),
        });
        // A literal structurally holds its datatype node, independent of
        // whatever tuples reference the literal itself, so the datatype's
        // refcount must stay >= 1 for as long as this literal is alive.
        self.incref(key.datatype);
        self.literals.borrow_mut().insert(key, id);
        Ok(id)
    }

    /// Snapshot a term's data. Returns `None` for the null handle or a
    /// handle that has been garbage-collected.
    pub fn term(&self, id: TermId) -> Option<Term> {
        if id.is_null() {
            return None;
        }
        let terms = self.terms.borrow();
        let data = terms.get(id.index())?.as_ref()?;
        Some(Term {
            kind: data.kind,
            lexical: data.lexical.clone(),
            datatype: (!data.datatype.is_null()).then_some(data.datatype),
            language: data.language.clone(),
        })
    }

    pub fn kind(&self, id: TermId) -> Option<TermKind> {
        if id.is_null() {
            return None;
        }
        let terms = self.terms.borrow();
        terms.get(id.index())?.as_ref().map(|d| d.kind)
    }

    pub fn lexical_form(&self, id: TermId) -> Option<Rc<str>> {
        if id.is_null() {
            return None;
        }
        let terms = self.terms.borrow();
        terms.get(id.index())?.as_ref().map(|d| d.lexical.clone())
    }

    /// Current refcount for a term: the number of quads across every
    /// [`crate::Quad`]-consuming model sharing this world that reference it
    /// in any of the four positions.
    pub fn ref_count(&self, id: TermId) -> u32 {
        if id.is_null() {
            return 0;
        }
        self.refs.borrow().get(id.index()).copied().unwrap_or(0)
    }

    /// Increment a term's refcount. Called once per quad position a term
    /// occupies when that quad is added to a model.
    pub fn incref(&self, id: TermId) {
        if id.is_null() {
            return;
        }
        self.refs.borrow_mut()[id.index()] += 1;
    }

    /// Decrement a term's refcount, freeing the dictionary entry (and its
    /// `TermId`) once it reaches zero.
    pub fn decref(&self, id: TermId) {
        if id.is_null() {
            return;
        }
        let mut refs = self.refs.borrow_mut();
        let count = &mut refs[id.index()];
        debug_assert!(*count > 0, "refcount underflow for {id:?}");
        *count -= 1;
        if *count == 0 {
            drop(refs);
            self.free(id);
        }
    }

    fn free(&self, id: TermId) {
        let data = self.terms.borrow_mut()[id.index()].take();
        if let Some(data) = data {
            match data.kind {
                TermKind::Uri => {
                    self.uris.borrow_mut().remove(&data.lexical);
                }
                TermKind::Blank => {
                    self.blanks.borrow_mut().remove(&data.lexical);
                }
                TermKind::Literal => {
                    let datatype = data.datatype;
                    let key = LiteralKey {
                        lexical: data.lexical,
                        datatype,
                        language: data.language,
                    };
                    self.literals.borrow_mut().remove(&key);
                    self.decref(datatype);
                }
            }
        }
        self.free_list.borrow_mut().push(id);
    }

    /// Number of live (non-freed) terms.
    pub fn len(&self) -> usize {
        self.terms.borrow().iter().filter(|t| t.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_same_uri_returns_same_id() {
        let w = World::new();
        let a = w.get_uri("http://example.org/s").unwrap();
        let b = w.get_uri("http://example.org/s").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_uris_get_different_ids() {
        let w = World::new();
        let a = w.get_uri("http://example.org/a").unwrap();
        let b = w.get_uri("http://example.org/b").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn literal_equality_is_three_way() {
        let w = World::new();
        let xsd_string = w.get_uri("http://www.w3.org/2001/XMLSchema#string").unwrap();
        let xsd_int = w.get_uri("http://www.w3.org/2001/XMLSchema#integer").unwrap();

        let plain = w.get_literal("42", None, None).unwrap();
        let typed_string = w.get_literal("42", Some(xsd_string), None).unwrap();
        let typed_int = w.get_literal("42", Some(xsd_int), None).unwrap();
        let with_lang = w.get_literal("42", None, Some("en")).unwrap();

        assert_ne!(plain, typed_string);
        assert_ne!(typed_string, typed_int);
        assert_ne!(plain, with_lang);
        assert_eq!(plain, w.get_literal("42", None, None).unwrap());
    }

    #[test]
    fn empty_uri_is_rejected() {
        let w = World::new();
        assert!(w.get_uri("").is_err());
    }

    #[test]
    fn refcount_starts_at_zero_and_frees_term_at_zero() {
        let w = World::new();
        let id = w.get_uri("http://example.org/s").unwrap();
        assert_eq!(w.ref_count(id), 0);
        w.incref(id);
        w.incref(id);
        assert_eq!(w.ref_count(id), 2);
        w.decref(id);
        assert_eq!(w.ref_count(id), 1);
        w.decref(id);
        assert_eq!(w.ref_count(id), 0);
        // term entry is gone, re-interning issues a fresh id from the free list
        let id2 = w.get_uri("http://example.org/s").unwrap();
        assert!(w.term(id2).is_some());
    }

    #[test]
    fn literal_datatype_outlives_its_literal_while_another_quad_holds_it() {
        let w = World::new();
        let datatype = w.get_uri("http://www.w3.org/2001/XMLSchema#integer").unwrap();
        let literal = w.get_literal("42", Some(datatype), None).unwrap();
        // get_literal already increfed datatype structurally
        assert_eq!(w.ref_count(datatype), 1);

        // one quad holds the literal as object
        w.incref(literal);
        // a second, independent quad holds the datatype URI directly
        w.incref(datatype);
        assert_eq!(w.ref_count(datatype), 2);

        // the first quad is removed
        w.decref(literal);
        assert!(w.term(literal).is_none());
        // datatype survives: the second quad still references it directly
        assert_eq!(w.ref_count(datatype), 1);

        // the second quad is removed too
        w.decref(datatype);
        assert_eq!(w.ref_count(datatype), 0);
        assert!(w.term(datatype).is_none());
    }

    #[test]
    fn fresh_blank_nodes_are_unique() {
        let w = World::new();
        let a = w.fresh_blank();
        let b = w.fresh_blank();
        assert_ne!(a, b);
    }

    #[test]
    fn null_handle_has_no_term() {
        let w = World::new();
        assert!(w.term(TermId::NULL).is_none());
        assert_eq!(w.ref_count(TermId::NULL), 0);
    }
}
