//! The twelve lexicographic quad orderings and which of them are enabled.
//!
//! Grounded in `original_source`'s `SordOrder` enum and `orderings` table
//! (`src/sord.c`): each ordering names which of the four quad positions is
//! most significant, down to least significant, for one sorted index.

use rdf_model::TermId;

/// One of the twelve permutations a quad can be indexed under.
///
/// The six non-`G*` orders store the graph component last (position 3 of
/// the permuted key) even though they don't use it to narrow a search —
/// this is what lets a single index serve both triple- and quad-shaped
/// queries, and what [`crate::iter::QuadIter`]'s graph-duplicate folding
/// has to account for.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum IndexOrder {
    Spo = 0,
    Sop = 1,
    Ops = 2,
    Osp = 3,
    Pso = 4,
    Pos = 5,
    Gspo = 6,
    Gsop = 7,
    Gops = 8,
    Gosp = 9,
    Gpso = 10,
    Gpos = 11,
}

pub const NUM_ORDERS: usize = 12;

const ORDERINGS: [[usize; 4]; NUM_ORDERS] = [
    [0, 1, 2, 3], // SPO
    [0, 2, 1, 3], // SOP
    [2, 1, 0, 3], // OPS
    [2, 0, 1, 3], // OSP
    [1, 0, 2, 3], // PSO
    [1, 2, 0, 3], // POS
    [3, 0, 1, 2], // GSPO
    [3, 0, 2, 1], // GSOP
    [3, 2, 1, 0], // GOPS
    [3, 2, 0, 1], // GOSP
    [3, 1, 0, 2], // GPSO
    [3, 1, 2, 0], // GPOS
];

impl IndexOrder {
    pub const ALL: [IndexOrder; NUM_ORDERS] = [
        IndexOrder::Spo,
        IndexOrder::Sop,
        IndexOrder::Ops,
        IndexOrder::Osp,
        IndexOrder::Pso,
        IndexOrder::Pos,
        IndexOrder::Gspo,
        IndexOrder::Gsop,
        IndexOrder::Gops,
        IndexOrder::Gosp,
        IndexOrder::Gpso,
        IndexOrder::Gpos,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IndexOrder::Spo => "spo",
            IndexOrder::Sop => "sop",
            IndexOrder::Ops => "ops",
            IndexOrder::Osp => "osp",
            IndexOrder::Pso => "pso",
            IndexOrder::Pos => "pos",
            IndexOrder::Gspo => "gspo",
            IndexOrder::Gsop => "gsop",
            IndexOrder::Gops => "gops",
            IndexOrder::Gosp => "gosp",
            IndexOrder::Gpso => "gpso",
            IndexOrder::Gpos => "gpos",
        }
    }

    /// The permutation this order applies to a `[s, p, o, g]` array, most
    /// to least significant.
    pub fn positions(self) -> [usize; 4] {
        ORDERINGS[self as usize]
    }

    /// True for the six `G*` orders, which put the graph component first.
    pub fn has_graph_prefix(self) -> bool {
        (self as u8) >= IndexOrder::Gspo as u8
    }

    /// The `G*` counterpart of a base order (identity on `G*` orders).
    pub fn with_graph_prefix(self) -> IndexOrder {
        match self {
            IndexOrder::Spo => IndexOrder::Gspo,
            IndexOrder::Sop => IndexOrder::Gsop,
            IndexOrder::Ops => IndexOrder::Gops,
            IndexOrder::Osp => IndexOrder::Gosp,
            IndexOrder::Pso => IndexOrder::Gpso,
            IndexOrder::Pos => IndexOrder::Gpos,
            g => g,
        }
    }

    /// Permute a `[s, p, o, g]` quad array into this order's key.
    pub fn permute(self, quad: [TermId; 4]) -> [TermId; 4] {
        let pos = self.positions();
        [quad[pos[0]], quad[pos[1]], quad[pos[2]], quad[pos[3]]]
    }

    /// Invert [`IndexOrder::permute`]: recover `[s, p, o, g]` from a key.
    pub fn unpermute(self, key: [TermId; 4]) -> [TermId; 4] {
        let pos = self.positions();
        let mut out = [TermId::NULL; 4];
        for (slot, value) in pos.iter().zip(key) {
            out[*slot] = value;
        }
        out
    }
}

/// Which of the twelve orders a [`crate::Model`] maintains.
///
/// The six bits mirror `original_source`'s `SordIndexOption` bitflags
/// (`SORD_SPO`, `SORD_SOP`, ...); `with_graphs` is tracked separately since
/// it gates a whole second family of six orders rather than being a flag
/// alongside them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IndexFlags {
    pub spo: bool,
    pub sop: bool,
    pub ops: bool,
    pub osp: bool,
    pub pso: bool,
    pub pos: bool,
    pub with_graphs: bool,
}

impl IndexFlags {
    pub const NONE: IndexFlags = IndexFlags {
        spo: false,
        sop: false,
        ops: false,
        osp: false,
        pso: false,
        pos: false,
        with_graphs: false,
    };

    /// The orders this configuration asks for, before the always-on
    /// default order is folded in (see `Model::new`).
    pub fn requested_orders(self) -> Vec<IndexOrder> {
        let mut orders = Vec::new();
        if self.spo {
            orders.push(IndexOrder::Spo);
        }
        if self.sop {
            orders.push(IndexOrder::Sop);
        }
        if self.ops {
            orders.push(IndexOrder::Ops);
        }
        if self.osp {
            orders.push(IndexOrder::Osp);
        }
        if self.pso {
            orders.push(IndexOrder::Pso);
        }
        if self.pos {
            orders.push(IndexOrder::Pos);
        }
        if self.with_graphs {
            orders = orders.iter().map(|o| o.with_graph_prefix()).collect();
        }
        orders
    }
}
