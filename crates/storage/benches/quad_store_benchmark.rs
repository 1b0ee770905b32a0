//! Run with: cargo bench --bench quad_store_benchmark

use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rdf_model::{Quad, TermId, World};
use storage::{IndexFlags, Model};

fn full_flags() -> IndexFlags {
    IndexFlags { spo: true, sop: true, ops: true, osp: true, pso: true, pos: true, with_graphs: false }
}

fn benchmark_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_add");

    for size in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let world = Rc::new(World::new());
                let mut model = Model::new(world.clone(), full_flags());
                let p = world.get_uri("http://example.org/predicate").unwrap();
                for i in 0..size {
                    let s = world.get_uri(&format!("http://example.org/subject{i}")).unwrap();
                    let o = world.get_uri(&format!("http://example.org/object{i}")).unwrap();
                    model.add(Quad::triple(s, p, o)).unwrap();
                }
                black_box(model)
            });
        });
    }

    group.finish();
}

fn benchmark_find_by_predicate(c: &mut Criterion) {
    let mut group = c.benchmark_group("model_find");

    let world = Rc::new(World::new());
    let mut model = Model::new(world.clone(), full_flags());
    let p = world.get_uri("http://example.org/predicate").unwrap();
    for i in 0..10_000 {
        let s = world.get_uri(&format!("http://example.org/subject{i}")).unwrap();
        let o = world.get_uri(&format!("http://example.org/object{i}")).unwrap();
        model.add(Quad::triple(s, p, o)).unwrap();
    }

    group.bench_function("predicate_bound_range_scan", |b| {
        b.iter(|| {
            let pattern = Quad::new(TermId::NULL, p, TermId::NULL, TermId::NULL);
            let mut iter = model.find(&pattern);
            let mut n = 0;
            while iter.next().unwrap().is_some() {
                n += 1;
            }
            black_box(n)
        });
    });

    group.finish();
}

fn benchmark_world_intern(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_intern");

    group.bench_function("intern_new_uris", |b| {
        b.iter(|| {
            let world = World::new();
            for i in 0..1_000 {
                black_box(world.get_uri(&format!("http://example.org/resource{i}")).unwrap());
            }
        });
    });

    group.bench_function("intern_duplicate_uris", |b| {
        let world = World::new();
        for i in 0..100 {
            world.get_uri(&format!("http://example.org/resource{i}")).unwrap();
        }
        b.iter(|| {
            for i in 0..100 {
                black_box(world.get_uri(&format!("http://example.org/resource{i}")).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_find_by_predicate, benchmark_world_intern);
criterion_main!(benches);
