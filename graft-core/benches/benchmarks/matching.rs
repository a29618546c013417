// Required for black_box uses
#![allow(clippy::unit_arg)]
use graft_core::{Matcher, NodeIndex};

use super::graphs::{grid, path};
use criterion::{AxisScale, BenchmarkId, Criterion, PlotConfiguration, criterion_group};
use std::hint::black_box;

fn bench_find_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_all/path3_in_grid");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let pattern = path(3);
    for size in [4, 8, 16, 32] {
        let target = grid(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(Matcher::new(&pattern, &target).find_all()))
        });
    }
    group.finish();
}

fn bench_first_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_match/path_in_grid");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let target = grid(16);
    for len in [2, 4, 8] {
        let pattern = path(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| black_box(Matcher::new(&pattern, &target).iter().next()))
        });
    }
    group.finish();
}

fn bench_partitioned(c: &mut Criterion) {
    let pattern = path(3);
    let target = grid(16);
    let half = NodeIndex::new(target.node_count() / 2);
    c.bench_function("find_all/partitioned_halves", |b| {
        b.iter(|| {
            let first = Matcher::new(&pattern, &target)
                .root_candidates(NodeIndex::new(0)..half)
                .find_all();
            let second = Matcher::new(&pattern, &target)
                .root_candidates(half..NodeIndex::new(target.node_count()))
                .find_all();
            black_box((first, second))
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default();
    targets =
        bench_find_all, bench_first_match, bench_partitioned
}
