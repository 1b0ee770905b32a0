//! Range/filter iteration over a single index.
//!
//! Grounded in `original_source`'s `_SordIter`/`sord_iter_next`/
//! `sord_iter_increment`/`sord_iter_seek_match`/`sord_iter_seek_match_range`
//! (`src/sord.c`). [`SearchMode::Single`] and [`SearchMode::Range`] share one
//! code path here: a `Set` cannot hold two quads with identical keys, so
//! checking the first `prefix_len` positions for a mismatch terminates a
//! fully-bound search after its one possible match exactly like a dedicated
//! single-match check would.
//!
//! `skip_graphs` folds runs of keys that agree on their first three permuted
//! positions into a single yielded result. This only ever does real work
//! when the chosen order is one of the six base (non-`G*`) orders serving a
//! query that doesn't care which graph a matching triple lives in — the
//! same condition `sord_iter_new` uses (`order < GSPO`), kept unconditional
//! on the pattern's own graph binding because when the graph *is* bound the
//! mode's own filtering already keeps one graph's rows from ever looking
//! like a run to begin with.

use std::collections::Bound;

use rdf_model::{Quad, TermId};

use crate::error::{StorageError, StorageResult};
use crate::indexes::IndexOrder;
use crate::planner::{Plan, SearchMode};

/// A single-order range/filter scan over a [`crate::Model`]'s quads.
///
/// Borrows the model for its lifetime. Becomes stale — and starts returning
/// [`StorageError::StaleIterator`] — if the model is mutated through any
/// path other than [`crate::Model::erase`] called on this same iterator.
pub struct QuadIter<'m> {
    model: &'m crate::Model,
    order: IndexOrder,
    mode: SearchMode,
    prefix_len: usize,
    pattern_key: [TermId; 4],
    skip_graphs: bool,
    cursor: Option<[TermId; 4]>,
    last_yielded: Option<[TermId; 4]>,
    done: bool,
    generation: u64,
}

impl<'m> QuadIter<'m> {
    pub(crate) fn new(model: &'m crate::Model, plan: Plan, pattern: &Quad) -> Self {
        let pattern_key = plan.order.permute(pattern.as_array());
        QuadIter {
            model,
            order: plan.order,
            mode: plan.mode,
            prefix_len: plan.prefix_len,
            pattern_key,
            skip_graphs: !plan.order.has_graph_prefix(),
            cursor: None,
            last_yielded: None,
            done: false,
            generation: model.generation(),
        }
    }

    /// The order this scan walks.
    pub fn order(&self) -> IndexOrder {
        self.order
    }

    /// The most recently yielded quad, if any. [`crate::Model::erase`] acts
    /// on this one.
    pub fn current(&self) -> Option<Quad> {
        self.last_yielded.map(|key| Quad::from_array(self.order.unpermute(key)))
    }

    fn full_match(&self, key: [TermId; 4]) -> bool {
        (0..4).all(|i| self.pattern_key[i].is_null() || self.pattern_key[i] == key[i])
    }

    fn prefix_matches(&self, key: [TermId; 4]) -> bool {
        (0..self.prefix_len).all(|i| self.pattern_key[i] == key[i])
    }

    /// Advance and return the next matching quad, or `None` once the scan is
    /// exhausted.
    pub fn next(&mut self) -> StorageResult<Option<Quad>> {
        if self.done {
            return Ok(None);
        }
        if self.model.generation() != self.generation {
            return Err(StorageError::StaleIterator);
        }

        let index = self.model.index(self.order);
        let set = index.borrow();

        loop {
            let candidate = match self.cursor {
                Some(last) => set.range((Bound::Excluded(last), Bound::Unbounded)).next().copied(),
                None => set.range((Bound::Included(self.pattern_key), Bound::Unbounded)).next().copied(),
            };

            let Some(key) = candidate else {
                self.done = true;
                return Ok(None);
            };

            let terminate = match self.mode {
                SearchMode::All | SearchMode::FilterAll => false,
                SearchMode::Single | SearchMode::Range | SearchMode::FilterRange => {
                    !self.prefix_matches(key)
                }
            };
            if terminate {
                self.done = true;
                return Ok(None);
            }

            let matches = match self.mode {
                SearchMode::FilterRange | SearchMode::FilterAll => self.full_match(key),
                SearchMode::All | SearchMode::Single | SearchMode::Range => true,
            };
            if !matches {
                self.cursor = Some(key);
                continue;
            }

            if self.skip_graphs {
                if let Some(prev) = self.last_yielded {
                    if prev[..3] == key[..3] {
                        self.cursor = Some(key);
                        continue;
                    }
                }
            }

            self.cursor = Some(key);
            self.last_yielded = Some(key);
            return Ok(Some(Quad::from_array(self.order.unpermute(key))));
        }
    }

    pub(crate) fn resync(&mut self) {
        self.generation = self.model.generation();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexes::IndexFlags;
    use crate::Model;
    use rdf_model::World;
    use std::rc::Rc;

    fn flags() -> IndexFlags {
        IndexFlags { spo: true, ops: true, pso: true, with_graphs: true, ..IndexFlags::NONE }
    }

    #[test]
    fn range_scan_stops_at_prefix_boundary() {
        let world = Rc::new(World::new());
        let mut model = Model::new(world.clone(), flags());
        let p = world.get_uri("http://example.org/p").unwrap();
        let o1 = world.get_uri("http://example.org/o1").unwrap();
        let o2 = world.get_uri("http://example.org/o2").unwrap();
        let other_p = world.get_uri("http://example.org/other-p").unwrap();

        for (subj_n, pred, obj) in [(1, p, o1), (2, p, o2), (3, other_p, o1)] {
            let s = world.get_uri(&format!("http://example.org/s{subj_n}")).unwrap();
            model.add(Quad::triple(s, pred, obj)).unwrap();
        }

        let pattern = Quad::new(TermId::NULL, p, TermId::NULL, TermId::NULL);
        let mut iter = model.find(&pattern);
        let mut seen = Vec::new();
        while let Some(q) = iter.next().unwrap() {
            seen.push(q);
        }
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|q| q.p == p));
    }

    #[test]
    fn graph_only_pattern_does_not_spill_into_next_graph() {
        let world = Rc::new(World::new());
        let mut model = Model::new(world.clone(), flags());
        let s = world.get_uri("http://example.org/s").unwrap();
        let p = world.get_uri("http://example.org/p").unwrap();
        let o = world.get_uri("http://example.org/o").unwrap();
        let g1 = world.get_uri("http://example.org/g1").unwrap();
        let g2 = world.get_uri("http://example.org/g2").unwrap();

        model.add(Quad::new(s, p, o, g1)).unwrap();
        model.add(Quad::new(s, p, o, g2)).unwrap();

        let pattern = Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, g1);
        let mut iter = model.find(&pattern);
        let mut seen = Vec::new();
        while let Some(q) = iter.next().unwrap() {
            seen.push(q);
        }
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].g, g1);
    }

    #[test]
    fn stale_iterator_errors_after_unrelated_mutation() {
        let world = Rc::new(World::new());
        let mut model = Model::new(world.clone(), flags());
        let s = world.get_uri("http://example.org/s").unwrap();
        let p = world.get_uri("http://example.org/p").unwrap();
        let o = world.get_uri("http://example.org/o").unwrap();
        model.add(Quad::triple(s, p, o)).unwrap();

        let mut iter = model.find(&Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL));
        let s2 = world.get_uri("http://example.org/s2").unwrap();
        model.add(Quad::triple(s2, p, o)).unwrap();

        assert!(matches!(iter.next(), Err(StorageError::StaleIterator)));
    }
}
