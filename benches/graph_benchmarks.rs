use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mailgraph::{DiameterOptions, Graph, GraphStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sparse random multigraph over `vertices` integer tokens
fn build_graph(vertices: u64, edges_per_vertex: u64) -> Graph<u64> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut store = GraphStore::new();
    for _ in 0..vertices * edges_per_vertex {
        store.add_edge(rng.gen_range(0..vertices), rng.gen_range(0..vertices));
    }
    store.freeze()
}

/// Benchmark edge accumulation throughput
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [1_000u64, 10_000, 100_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut store = GraphStore::new();
                for i in 0..size {
                    store.add_edge(i % 997, (i * 31) % 1009);
                }
                criterion::black_box(store.size());
            });
        });
    }
    group.finish();
}

/// Benchmark SCC and Eulerian check on the frozen view
fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("components");

    for size in [1_000u64, 10_000].iter() {
        let graph = build_graph(*size, 4);
        group.bench_with_input(BenchmarkId::new("scc", size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.strongly_connected_components().count()));
        });
        group.bench_with_input(BenchmarkId::new("eulerian", size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.eulerian_check().is_eulerian));
        });
    }
    group.finish();
}

/// Benchmark bounded single-source search
fn bench_bounded_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("bounded_search");
    let graph = build_graph(10_000, 4);
    let source = *graph.vertices().next().unwrap();

    for bound in [2u64, 5, 10].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(bound), bound, |b, &bound| {
            b.iter(|| {
                let paths = graph.shortest_paths(&source, Some(bound)).unwrap();
                criterion::black_box(paths.len());
            });
        });
    }
    group.finish();
}

/// Sequential vs parallel diameter sweep
fn bench_diameter(c: &mut Criterion) {
    let mut group = c.benchmark_group("diameter");
    group.sample_size(10);

    for size in [200u64, 1_000].iter() {
        let graph = build_graph(*size, 3);
        group.bench_with_input(BenchmarkId::new("sequential", size), size, |b, _| {
            let options = DiameterOptions {
                parallel: false,
                ..Default::default()
            };
            b.iter(|| criterion::black_box(graph.diameter_with(&options).value));
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), size, |b, _| {
            b.iter(|| criterion::black_box(graph.diameter().value));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_edge_insertion,
    bench_components,
    bench_bounded_search,
    bench_diameter
);
criterion_main!(benches);
