//! Query Builder Benchmarks
//!
//! Measures AST construction and text rendering for representative queries:
//!
//! - **Simple Queries**: MATCH / WHERE / RETURN
//! - **Patterns**: long paths, concatenation, quantified paths
//! - **Nested Queries**: CALL { } subqueries at increasing depth
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench simple_queries
//! ```

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cypher_builder::prelude::*;

// ============================================================================
// Simple Query Benchmarks
// ============================================================================

fn bench_simple_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_queries");

    group.bench_function("build_and_render", |b| {
        b.iter(|| {
            let query = match_([node("Person").named("p")])
                .where_(prop("p", "age").gt(literal(25)) & prop("p", "name").starts_with("A"))
                .return_(["p.name", "p.age"])
                .order_by([desc("p.age")])
                .limit(10);
            black_box(query.to_text())
        })
    });

    let prebuilt = match_([node("Person").named("p")])
        .where_(prop("p", "age").gt(literal(25)))
        .return_(["p.name", "p.age"]);
    group.bench_function("render_only", |b| b.iter(|| black_box(prebuilt.to_text())));

    group.finish();
}

// ============================================================================
// Pattern Benchmarks
// ============================================================================

fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");

    for length in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("adjacent_nodes", length), &length, |b, &n| {
            b.iter(|| {
                let nodes = (0..n).map(|i| node("Person").named(format!("n{i}")));
                black_box(path(nodes).to_string())
            })
        });
    }

    group.bench_function("concat_chain", |b| {
        b.iter(|| {
            let mut acc = path![node("Person").named("n0")];
            for i in 1..16 {
                let hop = path![
                    node("Person").named(format!("n{}", i - 1)),
                    relationship(Direction::Right).with_type("KNOWS"),
                    node("Person").named(format!("n{i}")),
                ];
                acc = match acc.concat(hop) {
                    Ok(next) => next,
                    Err(_) => break,
                };
            }
            black_box(acc.to_string())
        })
    });

    group.bench_function("quantified", |b| {
        b.iter(|| {
            let q = path![node("Person").named("a"), node("Person").named("b")]
                .quantify(Some(1), Some(5));
            black_box(q.map(|q| q.to_string()))
        })
    });

    group.finish();
}

// ============================================================================
// Nested Query Benchmarks
// ============================================================================

fn nested(depth: usize) -> QueryBuilder {
    let mut query = match_([node("Person").named("p")]).return_(["p"]);
    for _ in 0..depth {
        query = call_subquery(query, SubqueryScope::All).return_(["p"]);
    }
    query
}

fn bench_nested_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested_queries");

    for depth in [1usize, 4, 16] {
        let query = nested(depth);
        group.bench_with_input(BenchmarkId::new("render", depth), &query, |b, q| {
            b.iter(|| black_box(q.to_text()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_simple_queries,
    bench_patterns,
    bench_nested_queries
);
criterion_main!(benches);
