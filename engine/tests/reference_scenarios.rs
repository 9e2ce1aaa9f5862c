//! Reference scenarios on the built-in sample ontologies.
//!
//! Each scenario pins down one end-to-end outcome: what a concept implies and
//! excludes, and what a small panel of sources agrees on.

use ontoagg_engine::{aggregate, propagate, CombinationRule, HierarchyIndex, Statement};
use ontoagg_ontology::{Concept, Ontology, Property};

struct Small {
    onto: &'static Ontology,
    pt: Property,
    t: Property,
}

impl Small {
    fn new() -> Self {
        let onto = Ontology::small();
        Self {
            onto,
            pt: onto.find_property("hasPrimaryTopic").unwrap(),
            t: onto.find_property("hasTopic").unwrap(),
        }
    }

    fn c(&self, name: &str) -> Concept {
        self.onto.find_class(name).unwrap()
    }

    fn s(&self, p: Property, name: &str) -> Statement {
        Statement::new("XXX", p, self.c(name))
    }
}

fn set(onto: &Ontology, names: &[&str]) -> Vec<Concept> {
    let mut v: Vec<Concept> = names.iter().map(|n| onto.find_class(n).unwrap()).collect();
    v.sort_unstable();
    v
}

fn sorted(mut v: Vec<Concept>) -> Vec<Concept> {
    v.sort_unstable();
    v
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn small_h1c12_propagation() {
    let onto = Ontology::small();
    let index = HierarchyIndex::new(onto);
    let p = propagate(&index, onto.find_class("H1C12").unwrap());
    assert_eq!(
        sorted(p.positive.clone()),
        set(onto, &["H1C12", "H1C1", "S26", "Thing"])
    );
    assert_eq!(
        sorted(p.negative.clone()),
        set(onto, &["H1C13", "H1C11", "H1C2", "H1C3"])
    );
}

#[test]
fn small_h2c22_propagation_has_no_negatives() {
    let onto = Ontology::small();
    let index = HierarchyIndex::new(onto);
    let p = propagate(&index, onto.find_class("H2C22").unwrap());
    assert_eq!(sorted(p.positive.clone()), set(onto, &["H2C22", "H2C2", "Thing"]));
    assert!(p.negative.is_empty());
}

/// Two hierarchies indexed side by side do not interfere.
#[test]
fn medium_h1c12_propagation_is_independent_of_small() {
    let small = Ontology::small();
    let medium = Ontology::medium();
    let small_index = HierarchyIndex::new(small);
    let medium_index = HierarchyIndex::new(medium);

    let _ = propagate(&small_index, small.find_class("H1C12").unwrap());
    let p = propagate(&medium_index, medium.find_class("H1C12").unwrap());
    assert_eq!(
        sorted(p.positive.clone()),
        set(medium, &["H1C12", "S222", "H1C1", "Thing"])
    );
    assert_eq!(
        sorted(p.negative.clone()),
        set(medium, &["H1C13", "H1C11", "H1C2", "H1C3"])
    );
}

// ============================================================================
// Aggregation
// ============================================================================

/// Two votes for the same specific statement keep it.
#[test]
fn voting_keeps_a_unanimous_statement() {
    let f = Small::new();
    let index = HierarchyIndex::new(f.onto);
    let sources = vec![
        (1.0, vec![f.s(f.pt, "H1C11"), f.s(f.t, "H1C12")]),
        (1.0, vec![f.s(f.pt, "H1C11")]),
    ];
    let out = aggregate(&index, &sources, CombinationRule::Voting, 2.0);
    assert_eq!(out.into_description(), vec![f.s(f.pt, "H1C11")]);
}

/// Sibling votes meet at their common parent.
#[test]
fn voting_generalizes_to_the_shared_parent() {
    let f = Small::new();
    let index = HierarchyIndex::new(f.onto);
    let sources = vec![
        (1.0, vec![f.s(f.pt, "H1C11"), f.s(f.t, "H2C12")]),
        (1.0, vec![f.s(f.pt, "H1C12")]),
    ];
    let out = aggregate(&index, &sources, CombinationRule::Voting, 2.0);
    let got = out.into_description();
    assert!(
        got == vec![f.s(f.pt, "H1C1")] || got == vec![f.s(f.pt, "S26")],
        "unexpected consensus: {got:?}"
    );
}

/// The same panel under certainty factors 0.8 and 0.7 clears 0.92 only at
/// the parent, where the beliefs reinforce to 0.94.
#[test]
fn shortliffe_buchanan_generalizes_to_the_shared_parent() {
    let f = Small::new();
    let index = HierarchyIndex::new(f.onto);
    let sources = vec![
        (0.8, vec![f.s(f.pt, "H1C11"), f.s(f.t, "H2C12")]),
        (0.7, vec![f.s(f.pt, "H1C12")]),
    ];
    let out = aggregate(&index, &sources, CombinationRule::ShortliffeBuchanan, 0.92);
    assert_eq!(out.len(), 1);
    let (statement, belief) = out.iter().next().unwrap();
    assert!(*statement == f.s(f.pt, "H1C1") || *statement == f.s(f.pt, "S26"));
    assert!(belief > 0.8 && belief < 1.0);
    assert!((belief - 0.94).abs() < 1e-12);
}

/// Lowering the threshold lets the minority statement through as well.
///
/// H1C12 excludes H1C11 but not its synonym S57, so the first source's
/// claim survives under the synonym and covers the shared parent.
#[test]
fn voting_with_a_low_threshold_keeps_the_minority_claims() {
    let f = Small::new();
    let index = HierarchyIndex::new(f.onto);
    let sources = vec![
        (1.0, vec![f.s(f.pt, "H1C11"), f.s(f.t, "H2C12")]),
        (1.0, vec![f.s(f.pt, "H1C12")]),
    ];
    let out = aggregate(&index, &sources, CombinationRule::Voting, 1.0);
    assert_eq!(out.belief(&f.s(f.t, "H2C12")), Some(1.0));
    assert_eq!(out.belief(&f.s(f.pt, "S57")), Some(1.0));
    assert_eq!(out.len(), 2);
    assert!(!out.contains(&f.s(f.pt, "H1C11")));
    assert!(!out.contains(&f.s(f.pt, "H1C1")));
}

/// A higher threshold can drop one specific statement and expose two
/// incomparable generalizations it covered.
#[test]
fn raising_the_threshold_can_widen_the_consensus() {
    let f = Small::new();
    let index = HierarchyIndex::new(f.onto);
    let sources = vec![
        (1.0, vec![f.s(f.pt, "H1C11")]),
        (1.0, vec![f.s(f.pt, "H1C11")]),
        (1.0, vec![f.s(f.pt, "H1C12")]),
        (1.0, vec![f.s(f.t, "H1C11")]),
    ];
    let rule = CombinationRule::Voting;

    // H1C11 and S57 merge; the class keeps its strongest belief.
    let loose = aggregate(&index, &sources, rule, 1.0);
    assert_eq!(loose.clone().into_description(), vec![f.s(f.pt, "H1C11")]);
    assert_eq!(loose.belief(&f.s(f.pt, "H1C11")), Some(2.0));

    // The exclusion by H1C12 drops H1C11 below 2; its synonym holds.
    let middle = aggregate(&index, &sources, rule, 2.0);
    assert_eq!(middle.into_description(), vec![f.s(f.pt, "S57")]);

    let strict = aggregate(&index, &sources, rule, 3.0);
    let mut expected = vec![f.s(f.pt, "H1C1"), f.s(f.t, "S57")];
    expected.sort();
    assert_eq!(strict.into_description(), expected);

    let fused = ontoagg_engine::fuse(&index, &sources, rule);
    let supported = |t: f64| fused.values().filter(|&&b| b >= t).count();
    assert!(supported(3.0) <= supported(2.0));
    assert!(supported(2.0) <= supported(1.0));
}
