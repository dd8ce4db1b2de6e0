//! Hyperbolicity benchmark suite.
//!
//! Scaling of each stage on a deterministic "grid with shortcuts" graph:
//! - all-pairs shortest paths
//! - exact (all bases) against factor-2 (one base)
//! - log approximation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gromov::{
    DistanceMatrix, ExactHyperbolicity, Graph, LogApproximation, ShortestPaths,
    TwoFactorApproximation,
};

// =============================================================================
// Helper Functions
// =============================================================================

/// `side × side` grid plus a diagonal shortcut every few cells.
fn grid_graph(side: usize) -> Graph {
    let name = |r: usize, c: usize| format!("{r}:{c}");
    let mut g = Graph::new();
    for r in 0..side {
        for c in 0..side {
            g.add_node(&name(r, c));
        }
    }
    for r in 0..side {
        for c in 0..side {
            let w = 1.0 + ((r * 7 + c * 3) % 5) as f64 * 0.25;
            if c + 1 < side {
                g.add_edge(&name(r, c), &name(r, c + 1), w).expect("valid weight");
            }
            if r + 1 < side {
                g.add_edge(&name(r, c), &name(r + 1, c), w).expect("valid weight");
            }
            if r + 1 < side && c + 1 < side && (r + c) % 3 == 0 {
                g.add_edge(&name(r, c), &name(r + 1, c + 1), 1.5).expect("valid weight");
            }
        }
    }
    g
}

fn distances(g: &Graph) -> DistanceMatrix {
    ShortestPaths::new(g.adjacency())
        .map(|sp| sp.compute_all_pairs())
        .unwrap_or_default()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("all_pairs_shortest_paths");
    for side in [8, 16, 24] {
        let g = grid_graph(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &g, |b, g| {
            b.iter(|| distances(black_box(g)))
        });
    }
    group.finish();
}

fn bench_exact_vs_factor_two(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_vs_factor_two");
    group.sample_size(10);
    for side in [4, 6, 8] {
        let d = distances(&grid_graph(side));
        let n = side * side;
        group.bench_with_input(BenchmarkId::new("exact", n), &d, |b, d| {
            b.iter(|| {
                ExactHyperbolicity::new(black_box(d))
                    .map(|e| e.compute_exact_hyperbolicity())
            })
        });
        group.bench_with_input(BenchmarkId::new("factor_two", n), &d, |b, d| {
            b.iter(|| {
                TwoFactorApproximation::new(black_box(d))
                    .map(|a| a.compute_approximate_hyperbolicity())
            })
        });
    }
    group.finish();
}

fn bench_log_approximation(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_approximation");
    for side in [8, 16, 24] {
        let g = grid_graph(side);
        let d = distances(&g);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &(g, d), |b, (g, d)| {
            b.iter(|| {
                LogApproximation::new(black_box(d), g.adjacency())
                    .and_then(|a| a.compute_approximate_hyperbolicity())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_shortest_paths,
    bench_exact_vs_factor_two,
    bench_log_approximation
);
criterion_main!(benches);
