//! Cross-cutting end-to-end scenarios: round-trip identity, index-selection
//! correctness, dedup, graph isolation, iteration-during-erase, and
//! literal-vs-URI distinction.

use std::rc::Rc;

use rdf_model::{Quad, TermId, World};
use storage::{IndexFlags, Model};

fn spo_only() -> IndexFlags {
    IndexFlags { spo: true, ..IndexFlags::NONE }
}

fn ops_only() -> IndexFlags {
    IndexFlags { ops: true, ..IndexFlags::NONE }
}

fn spo_and_graphs() -> IndexFlags {
    IndexFlags { spo: true, with_graphs: true, ..IndexFlags::NONE }
}

// S1 - round-trip identity: add, ask, count, remove, dictionary fully reclaimed.
#[test]
fn s1_round_trip_identity() {
    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), spo_only());

    let a = world.get_uri("eg:a").unwrap();
    let b = world.get_uri("eg:b").unwrap();
    let c = world.get_literal("c", None, None).unwrap();

    model.add(Quad::triple(a, b, c)).unwrap();

    assert!(model.ask(&Quad::new(a, b, c, TermId::NULL)));
    assert_eq!(model.count(&Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL)), 1);

    model.remove(&Quad::triple(a, b, c)).unwrap();

    assert_eq!(model.count(&Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL)), 0);
    assert_eq!(world.ref_count(a), 0);
    assert_eq!(world.ref_count(b), 0);
    assert_eq!(world.ref_count(c), 0);
}

// S2 - index selection correctness: only OPS enabled, a subject-only query
// still answers correctly via a filtered full scan (FILTER_ALL).
#[test]
fn s2_index_selection_correctness() {
    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), ops_only());

    let s1 = world.get_uri("eg:s1").unwrap();
    let s2 = world.get_uri("eg:s2").unwrap();
    let s3 = world.get_uri("eg:s3").unwrap();
    let p = world.get_uri("eg:p").unwrap();
    let o = world.get_uri("eg:o").unwrap();
    let o2 = world.get_uri("eg:o2").unwrap();

    model.add(Quad::triple(s1, p, o)).unwrap();
    model.add(Quad::triple(s2, p, o)).unwrap();
    model.add(Quad::triple(s3, p, o2)).unwrap();

    assert_eq!(model.count(&Quad::new(TermId::NULL, p, o, TermId::NULL)), 2);
    assert_eq!(model.count(&Quad::new(TermId::NULL, TermId::NULL, o, TermId::NULL)), 2);

    let pattern = Quad::new(s1, TermId::NULL, TermId::NULL, TermId::NULL);
    let iter = model.find(&pattern);
    assert_eq!(iter.order(), storage::IndexOrder::Ops);
    assert_eq!(model.count(&pattern), 1);
}

// S3 - dedup: adding the same quad three times leaves exactly one stored.
#[test]
fn s3_dedup() {
    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), spo_only());
    let s = world.get_uri("eg:s").unwrap();
    let p = world.get_uri("eg:p").unwrap();
    let o = world.get_uri("eg:o").unwrap();
    let q = Quad::triple(s, p, o);

    assert!(model.add(q).unwrap());
    assert!(!model.add(q).unwrap());
    assert!(!model.add(q).unwrap());
    assert_eq!(model.num_quads(), 1);

    assert!(model.remove(&q).unwrap());
    assert_eq!(model.num_quads(), 0);
}

// S4 - graph isolation: same triple in two named graphs counts separately
// by graph but together across graphs.
#[test]
fn s4_graph_isolation() {
    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), spo_and_graphs());
    let s = world.get_uri("eg:s").unwrap();
    let p = world.get_uri("eg:p").unwrap();
    let o = world.get_uri("eg:o").unwrap();
    let g1 = world.get_uri("eg:g1").unwrap();
    let g2 = world.get_uri("eg:g2").unwrap();

    model.add(Quad::new(s, p, o, g1)).unwrap();
    model.add(Quad::new(s, p, o, g2)).unwrap();

    assert_eq!(model.count(&Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL)), 2);
    assert_eq!(model.count(&Quad::new(s, p, o, g1)), 1);
}

// S5 - iteration during erase: deleting every other quad while iterating
// halves the store without the iterator ever reporting itself stale.
#[test]
fn s5_iteration_during_erase() {
    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), spo_only());
    let p = world.get_uri("eg:p").unwrap();
    let o = world.get_uri("eg:o").unwrap();
    for n in 0..100 {
        let s = world.get_uri(&format!("eg:s{n}")).unwrap();
        model.add(Quad::triple(s, p, o)).unwrap();
    }
    assert_eq!(model.num_quads(), 100);

    let pattern = Quad::new(TermId::NULL, TermId::NULL, TermId::NULL, TermId::NULL);
    let mut iter = model.find(&pattern);
    let mut step = 0;
    while iter.next().unwrap().is_some() {
        if step % 2 == 0 {
            model.erase(&mut iter).unwrap();
        }
        step += 1;
    }

    assert_eq!(model.num_quads(), 50);
}

// S6 - literal vs URI distinction: a URI and a same-spelled plain literal
// intern to distinct handles.
#[test]
fn s6_literal_vs_uri_distinction() {
    let world = Rc::new(World::new());
    let before = world.len();

    let uri = world.get_uri("eg:x").unwrap();
    let literal = world.get_literal("eg:x", None, None).unwrap();

    assert_ne!(uri, literal);
    assert_eq!(world.len(), before + 2);
}
