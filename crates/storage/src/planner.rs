//! Best-index selection.
//!
//! A direct port of `original_source`'s `sord_best_index` (`src/sord.c`):
//! a signature built from which of subject/predicate/object are bound
//! picks a pair of "good" orders that answer the query with a plain range
//! scan; if neither is enabled, a second pair that needs post-filtering is
//! tried; failing that, a full scan of the default order, filtered.
//!
//! Three corrections versus the literal C source:
//!
//! - There, the two `n_prefix` bump calls for a graph-bound query share one
//!   counter and can double it when the first candidate order isn't
//!   enabled, double-counting the graph position for the second candidate.
//!   Here each candidate starts from the same base prefix length, which is
//!   what the surrounding logic intends.
//! - There, a pattern with only the graph bound (`sig == 0`, graph search)
//!   is answered in `ALL` mode with `n_prefix` left at zero, so the walk
//!   never stops at the end of that graph's run and spills into the next
//!   graph's quads once a store holds more than one. `sord_iter_increment`
//!   simply never checks a prefix in `ALL` mode, regardless of whether one
//!   was set up for it. Here that case is planned as `Range` with
//!   `prefix_len = 1`, which the iterator's ordinary range-termination
//!   check handles correctly.
//! - The original always assumes a `DEFAULT_GRAPH_ORDER` exists once graph
//!   indexing was requested anywhere in the library's lifetime. A `Model`
//!   here can be built without graph orders at all, so `default_graph_order`
//!   is `Option`-typed; when it's `None` and the pattern still binds a
//!   graph, the plan computed as if the graph weren't indexable is upgraded
//!   to a filtering mode so [`crate::iter::QuadIter`]'s full-position match
//!   still rejects wrong-graph quads.

use rdf_model::Quad;
use rustc_hash::FxHashSet;

use crate::indexes::IndexOrder;

/// How a [`crate::iter::QuadIter`] should walk the chosen index.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchMode {
    /// No bound positions: walk the whole index.
    All,
    /// Every position bound: at most one matching key.
    Single,
    /// A leading run of positions bound: range-scan a prefix, no filtering.
    Range,
    /// A leading run of positions bound, but the index can only offer a
    /// shorter matching prefix: range-scan that prefix, then filter.
    FilterRange,
    /// No usable prefix at all: walk the whole default order, filtering.
    FilterAll,
}

/// The plan returned by [`best_index`].
#[derive(Clone, Copy, Debug)]
pub struct Plan {
    pub order: IndexOrder,
    pub mode: SearchMode,
    pub prefix_len: usize,
}

fn has_index(
    enabled: &FxHashSet<IndexOrder>,
    order: IndexOrder,
    graph_search: bool,
    base_prefix_len: usize,
) -> Option<(IndexOrder, usize)> {
    let (order, prefix_len) = if graph_search {
        (order.with_graph_prefix(), base_prefix_len + 1)
    } else {
        (order, base_prefix_len)
    };
    enabled.contains(&order).then_some((order, prefix_len))
}

/// Pick the best available index, search mode, and prefix length for
/// `pattern`, given the set of `enabled` orders, this model's default
/// (non-graph) order (always enabled), and its default graph order, if the
/// model maintains one (`IndexFlags::with_graphs`).
pub fn best_index(
    enabled: &FxHashSet<IndexOrder>,
    default_order: IndexOrder,
    default_graph_order: Option<IndexOrder>,
    pattern: &Quad,
) -> Plan {
    use IndexOrder::*;
    use SearchMode::*;

    let graph_bound = !pattern.g.is_null();
    let graph_search = graph_bound && default_graph_order.is_some();
    let graph_order = default_graph_order.unwrap_or(default_order);
    let sig = ((!pattern.s.is_null() as u8) << 2)
        | ((!pattern.p.is_null() as u8) << 1)
        | (!pattern.o.is_null() as u8);

    let mut plan = if sig == 0b000 {
        if graph_search {
            // Graph alone is bound: range-scan the one run of the graph
            // index sharing that graph prefix, not the whole index.
            Plan { order: graph_order, mode: Range, prefix_len: 1 }
        } else {
            Plan { order: default_order, mode: All, prefix_len: 0 }
        }
    } else if sig == 0b111 {
        let order = if graph_search { graph_order } else { default_order };
        let prefix_len = 3 + graph_search as usize;
        Plan { order, mode: Single, prefix_len }
    } else {
        let (good0, good1, base_prefix_len) = match sig {
            0b001 => (Ops, Osp, 1),
            0b010 => (Pos, Pso, 1),
            0b011 => (Ops, Pos, 2),
            0b100 => (Spo, Sop, 1),
            0b101 => (Sop, Osp, 2),
            0b110 => (Spo, Pso, 2),
            _ => unreachable!("3-bit signature"),
        };

        has_index(enabled, good0, graph_search, base_prefix_len)
            .or_else(|| has_index(enabled, good1, graph_search, base_prefix_len))
            .map(|(order, prefix_len)| Plan { order, mode: Range, prefix_len })
            .or_else(|| {
                let (filter0, filter1) = match sig {
                    0b011 => (Osp, Pso),
                    0b101 => (Spo, Ops),
                    0b110 => (Sop, Pos),
                    _ => unreachable!("3-bit signature"),
                };
                has_index(enabled, filter0, graph_search, 1)
                    .or_else(|| has_index(enabled, filter1, graph_search, 1))
                    .map(|(order, prefix_len)| Plan { order, mode: FilterRange, prefix_len })
            })
            .unwrap_or_else(|| {
                if graph_search {
                    Plan { order: graph_order, mode: FilterRange, prefix_len: 1 }
                } else {
                    Plan { order: default_order, mode: FilterAll, prefix_len: 0 }
                }
            })
    };

    // The graph is bound but no graph order exists to have folded it into
    // `plan` above: nothing upstream filtered by it, so force a mode that
    // applies the iterator's full-position match.
    if graph_bound && default_graph_order.is_none() {
        plan.mode = match plan.mode {
            All => FilterAll,
            Single | Range => FilterRange,
            already_filtered => already_filtered,
        };
    }

    plan
}
