// Required for black_box uses
#![allow(clippy::unit_arg)]
use graft_core::Rule;

use super::graphs::{close_square, grid};
use criterion::{AxisScale, BatchSize, BenchmarkId, Criterion, PlotConfiguration, criterion_group};
use std::hint::black_box;

fn bench_derive(c: &mut Criterion) {
    let mut builder = graft_core::RuleGraphBuilder::new();
    let mut prev = builder.preserved_node(graft_core::Node::new("n0"));
    for i in 1..64 {
        let next = builder.preserved_node(graft_core::Node::new(format!("n{i}")));
        builder.preserved_edge(prev, next, format!("e{i}"));
        prev = next;
    }
    let graph = builder.finish();
    c.bench_function("derive/preserved_path64", |b| {
        b.iter(|| black_box(Rule::from_graph(&graph)))
    });
}

fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply/close_square");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let rule = close_square();
    for size in [4, 16, 64] {
        let target = grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter_batched(
                || rule.matcher(&target).iter().next().unwrap(),
                |m| black_box(rule.apply(&target, &m)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        bench_derive, bench_apply
}
