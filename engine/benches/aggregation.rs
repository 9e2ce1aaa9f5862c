//! Benchmarks for propagation and aggregation on the sample ontologies.
//!
//! Cold runs build a fresh index per iteration; warm runs reuse one index
//! filled by `warm()`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ontoagg_engine::{aggregate, propagate, CombinationRule, HierarchyIndex, Statement};
use ontoagg_ontology::{Ontology, Property};

// ============================================================================
// Fixtures
// ============================================================================

fn primary_topic(onto: &Ontology) -> Property {
    onto.find_property("hasPrimaryTopic")
        .unwrap_or(Property::TOP_OBJECT)
}

/// A panel of `n` sources, each naming one leaf of the first tree.
fn panel(onto: &Ontology, n: usize) -> Vec<(f64, Vec<Statement>)> {
    let pt = primary_topic(onto);
    let leaves = ["H1C111", "H1C112", "H1C121", "H1C211", "H1C113"];
    (0..n)
        .filter_map(|i| {
            let c = onto.find_class(leaves[i % leaves.len()])?;
            Some((1.0, vec![Statement::new("item", pt, c)]))
        })
        .collect()
}

// ============================================================================
// Propagation
// ============================================================================

fn bench_propagate(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagate");
    for name in ["small", "medium", "large"] {
        let Some(onto) = Ontology::sample(name) else {
            continue;
        };
        let concepts: Vec<_> = onto.concepts().collect();
        group.throughput(Throughput::Elements(concepts.len() as u64));

        group.bench_with_input(BenchmarkId::new("cold", name), &concepts, |b, concepts| {
            b.iter(|| {
                let index = HierarchyIndex::new(onto);
                for &concept in concepts {
                    black_box(propagate(&index, concept));
                }
            });
        });

        let index = HierarchyIndex::new(onto);
        index.warm();
        group.bench_with_input(BenchmarkId::new("warm", name), &concepts, |b, concepts| {
            b.iter(|| {
                for &concept in concepts {
                    black_box(propagate(&index, concept));
                }
            });
        });
    }
    group.finish();
}

// ============================================================================
// Aggregation
// ============================================================================

fn bench_aggregate(c: &mut Criterion) {
    let onto = Ontology::medium();
    let index = HierarchyIndex::new(onto);
    index.warm();

    let mut group = c.benchmark_group("aggregate");
    for n in [2usize, 5, 10, 25] {
        let sources = panel(onto, n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("voting", n), &sources, |b, sources| {
            b.iter(|| aggregate(&index, black_box(sources), CombinationRule::Voting, 2.0));
        });
        let weighted: Vec<_> = sources.iter().map(|(_, d)| (0.6, d.clone())).collect();
        group.bench_with_input(BenchmarkId::new("sb", n), &weighted, |b, sources| {
            b.iter(|| {
                aggregate(
                    &index,
                    black_box(sources),
                    CombinationRule::ShortliffeBuchanan,
                    0.8,
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_propagate, bench_aggregate);
criterion_main!(benches);
