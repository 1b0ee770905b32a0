//! The quad store itself: an index set, atomic mutation, and query entry
//! points.
//!
//! Shaped like a `QuadStore` built on an owned dictionary handle with an
//! insert/remove/contains/find surface, generalized from a single
//! byte-encoded backend to twelve in-memory `BTreeSet` indices, and grounded
//! in `original_source`'s `sord_add`/`sord_remove`/`sord_erase` for the
//! exact mutation semantics (duplicate add is a no-op detected via one index
//! before any index is touched; every position's refcount moves with the
//! quad).

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;

use rdf_model::{Quad, TermId, World};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{StorageError, StorageResult};
use crate::indexes::{IndexFlags, IndexOrder};
use crate::iter::QuadIter;
use crate::observability::{track_operation, OperationType};
use crate::planner;

/// An in-memory multi-index quad store over one [`World`]'s terms.
pub struct Model {
    world: Rc<World>,
    indices: FxHashMap<IndexOrder, RefCell<BTreeSet<[TermId; 4]>>>,
    enabled: FxHashSet<IndexOrder>,
    default_order: IndexOrder,
    default_graph_order: Option<IndexOrder>,
    count: Cell<usize>,
    generation: Cell<u64>,
}

impl Model {
    /// Build a model over `world` maintaining the orders `flags` asks for,
    /// plus whatever defaults are mandated below (see module docs on
    /// [`IndexFlags`]).
    pub fn new(world: Rc<World>, flags: IndexFlags) -> Self {
        let mut base: Vec<IndexOrder> = [
            (flags.spo, IndexOrder::Spo),
            (flags.sop, IndexOrder::Sop),
            (flags.ops, IndexOrder::Ops),
            (flags.osp, IndexOrder::Osp),
            (flags.pso, IndexOrder::Pso),
            (flags.pos, IndexOrder::Pos),
        ]
        .into_iter()
        .filter_map(|(on, order)| on.then_some(order))
        .collect();

        if base.is_empty() {
            base = vec![IndexOrder::Spo, IndexOrder::Ops, IndexOrder::Pso];
        }

        let mut enabled: FxHashSet<IndexOrder> = if flags.with_graphs {
            base.iter().map(|o| o.with_graph_prefix()).collect()
        } else {
            base.into_iter().collect()
        };

        enabled.insert(IndexOrder::Spo);
        let default_graph_order = if flags.with_graphs {
            enabled.insert(IndexOrder::Gspo);
            Some(IndexOrder::Gspo)
        } else {
            None
        };

        let indices = enabled
            .iter()
            .map(|&order| (order, RefCell::new(BTreeSet::new())))
            .collect();

        Model {
            world,
            indices,
            enabled,
            default_order: IndexOrder::Spo,
            default_graph_order,
            count: Cell::new(0),
            generation: Cell::new(0),
        }
    }

    /// The term dictionary this model's quads are interned against.
    pub fn world(&self) -> &Rc<World> {
        &self.world
    }

    /// Number of distinct quads currently stored.
    pub fn num_quads(&self) -> usize {
        self.count.get()
    }

    pub fn is_empty(&self) -> bool {
        self.count.get() == 0
    }

    /// Which orders this model maintains.
    pub fn enabled_orders(&self) -> &FxHashSet<IndexOrder> {
        &self.enabled
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub(crate) fn index(&self, order: IndexOrder) -> &RefCell<BTreeSet<[TermId; 4]>> {
        self.indices.get(&order).expect("order not enabled on this model")
    }

    fn validate_quad(&self, quad: &Quad) -> StorageResult<()> {
        if quad.s.is_null() || quad.p.is_null() || quad.o.is_null() {
            return Err(StorageError::BadArgument(
                "subject, predicate, and object must be non-null".into(),
            ));
        }
        Ok(())
    }

    /// Insert `quad`. Returns `Ok(false)` without side effects if the quad
    /// was already present — adding a duplicate is a no-op, not an error.
    ///
    /// The default order is checked first and the whole add aborts if it
    /// already has the key, so a duplicate never partially bumps refcounts
    /// or partially populates the other indices (mirrors `sord_add`).
    pub fn add(&self, quad: Quad) -> StorageResult<bool> {
        track_operation(OperationType::Add, || {
            self.validate_quad(&quad)?;
            let array = quad.as_array();
            let default_key = self.default_order.permute(array);
            if self.index(self.default_order).borrow().contains(&default_key) {
                return Ok(false);
            }

            for &order in &self.enabled {
                self.index(order).borrow_mut().insert(order.permute(array));
            }

            for pos in array {
                self.world.incref(pos);
            }
            self.count.set(self.count.get() + 1);
            self.bump_generation();
            Ok(true)
        })
    }

    /// Remove `quad`. Returns `Ok(false)` without side effects if it wasn't
    /// present.
    pub fn remove(&self, quad: &Quad) -> StorageResult<bool> {
        track_operation(OperationType::Remove, || {
            let array = quad.as_array();
            let default_key = self.default_order.permute(array);
            if !self.index(self.default_order).borrow_mut().remove(&default_key) {
                return Ok(false);
            }
            for &order in self.enabled.iter().filter(|&&o| o != self.default_order) {
                self.index(order).borrow_mut().remove(&order.permute(array));
            }
            for pos in array {
                self.world.decref(pos);
            }
            self.count.set(self.count.get().saturating_sub(1));
            self.bump_generation();
            Ok(true)
        })
    }

    /// Remove the quad `iter` last yielded, then resynchronize `iter` so it
    /// can keep advancing from that point rather than reporting itself
    /// stale. The sole exception to "any mutation invalidates other open
    /// iterators": this method only touches `iter` itself.
    pub fn erase(&self, iter: &mut QuadIter<'_>) -> StorageResult<()> {
        track_operation(OperationType::Erase, || {
            let Some(quad) = iter.current() else {
                return Err(StorageError::BadArgument("iterator has not yielded a quad yet".into()));
            };
            self.remove(&quad)?;
            iter.resync();
            Ok(())
        })
    }

    /// True if `quad` is present (checked against the default order only).
    pub fn contains(&self, quad: &Quad) -> bool {
        let key = self.default_order.permute(quad.as_array());
        self.index(self.default_order).borrow().contains(&key)
    }

    /// True if any stored quad matches `pattern` (`TermId::NULL` fields are
    /// wildcards). Short-circuits on the first match rather than counting.
    pub fn ask(&self, pattern: &Quad) -> bool {
        let mut iter = self.find(pattern);
        matches!(iter.next(), Ok(Some(_)))
    }

    /// Count quads matching `pattern`.
    pub fn count(&self, pattern: &Quad) -> usize {
        let mut iter = self.find(pattern);
        let mut n = 0;
        while let Ok(Some(_)) = iter.next() {
            n += 1;
        }
        n
    }

    /// Open a range/filter scan over the quads matching `pattern`.
    #[tracing::instrument(level = "debug", skip(self), fields(op = OperationType::Find.name()))]
    pub fn find(&self, pattern: &Quad) -> QuadIter<'_> {
        let plan = planner::best_index(&self.enabled, self.default_order, self.default_graph_order, pattern);
        QuadIter::new(self, plan, pattern)
    }

    /// Scan every stored quad, in the default order's storage order.
    pub fn begin(&self) -> QuadIter<'_> {
        self.find(&Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL))
    }

    /// [`Model::find`] built from optional positions rather than a `Quad`
    /// pattern; `None` is a wildcard.
    pub fn search(
        &self,
        s: Option<TermId>,
        p: Option<TermId>,
        o: Option<TermId>,
        g: Option<TermId>,
    ) -> QuadIter<'_> {
        self.find(&Quad::new(
            s.unwrap_or(TermId::NULL),
            p.unwrap_or(TermId::NULL),
            o.unwrap_or(TermId::NULL),
            g.unwrap_or(TermId::NULL),
        ))
    }

    /// The term at the single `None` position across `s`/`p`/`o` of the
    /// first quad matching the rest, or `None` if nothing matches. Exactly
    /// one of `s`, `p`, `o` must be `None`.
    pub fn get(
        &self,
        s: Option<TermId>,
        p: Option<TermId>,
        o: Option<TermId>,
        g: Option<TermId>,
    ) -> StorageResult<Option<TermId>> {
        if [s, p, o].iter().filter(|x| x.is_none()).count() != 1 {
            return Err(StorageError::BadArgument("exactly one of s, p, o must be null".into()));
        }
        let mut iter = self.search(s, p, o, g);
        let Some(quad) = iter.next()? else {
            return Ok(None);
        };
        Ok(Some(if s.is_none() {
            quad.s
        } else if p.is_none() {
            quad.p
        } else {
            quad.o
        }))
    }

    /// `refcount(term) == 1` and `term` occupies the object position of its
    /// one containing quad — a candidate for inline/nested serialization by
    /// an egress writer. The writer decides whether to act on
    /// it; this is purely informational.
    pub fn is_inline_object(&self, term: TermId) -> bool {
        if term.is_null() || self.world.ref_count(term) != 1 {
            return false;
        }
        self.ask(&Quad::new(TermId::NULL, TermId::NULL, term, TermId::NULL))
    }

    fn bump_generation(&self) {
        self.generation.set(self.generation.get() + 1);
    }
}
