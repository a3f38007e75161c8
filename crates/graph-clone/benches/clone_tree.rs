// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Tests/examples panic on failure
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use graph_clone::{
    ClassBuilder, Cloner, ClonerConfig, DeclaredType, HashMapTypeRegistry, ObjRef, TypeDef,
};

fn registry() -> HashMapTypeRegistry {
    HashMapTypeRegistry::new()
        .with_type(
            ClassBuilder::new("Node")
                .member("left", "Node")
                .member("right", "Node")
                .member("value", DeclaredType::Any)
                .build(),
        )
        .with_type(TypeDef::array("Node[]", "Node"))
}

fn cloner() -> Cloner {
    Cloner::with_config(registry(), ClonerConfig::default().with_unlimited_depth())
}

fn make_tree(cloner: &Cloner, depth: u32) -> Option<ObjRef> {
    if depth == 0 {
        return None;
    }
    let node = cloner.instantiate("Node").expect("node");
    node.set_field("value", depth).expect("value");
    node.set_field("left", make_tree(cloner, depth - 1))
        .expect("left");
    node.set_field("right", make_tree(cloner, depth - 1))
        .expect("right");
    Some(node)
}

fn bench_warm_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_tree/warm");
    let cloner = cloner();

    for depth in [10u32, 12, 14, 16] {
        let root = make_tree(&cloner, depth).expect("tree");
        cloner.deep_clone(&root).expect("warmup");

        group.bench_with_input(BenchmarkId::from_parameter(depth), &root, |b, root| {
            b.iter(|| black_box(cloner.deep_clone(root).expect("clone")))
        });
    }
    group.finish();
}

fn bench_cold_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_tree/cold");
    let builder = cloner();
    let root = make_tree(&builder, 10).expect("tree");

    group.bench_function("depth_10", |b| {
        b.iter_batched(
            cloner,
            |fresh| black_box(fresh.deep_clone(&root).expect("clone")),
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_shared_array(c: &mut Criterion) {
    let cloner = cloner();
    let shared = make_tree(&cloner, 8).expect("tree");
    let array = cloner.new_array("Node[]", 1024).expect("array");
    for i in 0..1024 {
        array.set_element(i, &shared).expect("element");
    }
    cloner.deep_clone(&array).expect("warmup");

    c.bench_function("clone_tree/shared_array_1024", |b| {
        b.iter(|| black_box(cloner.deep_clone(&array).expect("clone")))
    });
}

criterion_group!(benches, bench_warm_cache, bench_cold_cache, bench_shared_array);
criterion_main!(benches);
