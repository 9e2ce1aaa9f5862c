//! One index shared by several worker threads.

use std::thread;

use ontoagg_engine::{aggregate, metric, CachePolicy, CombinationRule, HierarchyIndex, Statement};
use ontoagg_ontology::{HierarchyGraph, Ontology};

fn panel(onto: &Ontology, item: &str, names: [&str; 2]) -> Vec<(f64, Vec<Statement>)> {
    let pt = onto.find_property("hasPrimaryTopic").unwrap();
    names
        .iter()
        .map(|n| (1.0, vec![Statement::new(item, pt, onto.find_class(n).unwrap())]))
        .collect()
}

/// Workers sharing a warmed index agree with a private cold index.
#[test]
fn shared_index_matches_private_indexes() {
    let onto = Ontology::medium();
    let shared = HierarchyIndex::new(onto);
    shared.warm();
    let warmed = shared.cache_stats().entries;

    let panels = [
        ["H1C11", "H1C12"],
        ["H3C11", "H3C12"],
        ["H2C111", "H2C112"],
        ["H4C1", "H4C13"],
    ];

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = panels
            .iter()
            .enumerate()
            .map(|(i, names)| {
                let shared = &shared;
                scope.spawn(move || {
                    let sources = panel(onto, &format!("item{i}"), *names);
                    let out = aggregate(shared, &sources, CombinationRule::Voting, 2.0);
                    let d = metric(shared, &sources[0].1, &sources[1].1);
                    (out, d)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (i, names) in panels.iter().enumerate() {
        let private = HierarchyIndex::new(onto);
        let sources = panel(onto, &format!("item{i}"), *names);
        let out = aggregate(&private, &sources, CombinationRule::Voting, 2.0);
        assert_eq!(results[i].0, out);
        assert_eq!(results[i].1, metric(&private, &sources[0].1, &sources[1].1));
    }
    // Warming covered every concept and property, so the workers only read.
    assert_eq!(shared.cache_stats().entries, warmed);
}

/// A capped index answers the same as an unbounded one.
#[test]
fn capped_index_gives_the_same_answers() {
    let onto = Ontology::small();
    let capped = HierarchyIndex::with_policy(onto, CachePolicy::Capped(4));
    let unbounded = HierarchyIndex::new(onto);
    for c in onto.all_concepts().into_iter().step_by(7) {
        assert_eq!(capped.ancestors(c), unbounded.ancestors(c));
        assert_eq!(capped.disjoints_of(c), unbounded.disjoints_of(c));
    }
    assert!(capped.cache_stats().entries <= 6 * 4);
}
