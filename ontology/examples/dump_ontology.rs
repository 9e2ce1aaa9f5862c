//! Demonstrates loading the built-in sample ontologies and walking a hierarchy.
//!
//! Run with: `cargo run --example dump_ontology -p ontoagg-ontology`

use ontoagg_ontology::{HierarchyGraph, Ontology};

fn main() {
    for name in ["small", "medium", "large"] {
        let Some(onto) = Ontology::sample(name) else {
            continue;
        };
        println!(
            "  {:8} {:40} {:>5} classes, {:>2} properties, {:>3} disjoint groups, {:>4} equivalences",
            name,
            onto.base_iri,
            onto.class_count(),
            onto.property_count(),
            onto.disjoint_group_count(),
            onto.equivalence_count(),
        );
    }

    println!();

    let onto = Ontology::small();
    if let Some(h1c12) = onto.find_class("H1C12") {
        let ancestors: Vec<&str> = onto
            .concept_ancestors(h1c12)
            .into_iter()
            .map(|c| onto.concept_label(c))
            .collect();
        let disjoints: Vec<&str> = onto
            .concept_disjoints(h1c12)
            .into_iter()
            .map(|c| onto.concept_label(c))
            .collect();
        println!("H1C12 ancestors: {}", ancestors.join(", "));
        println!("H1C12 disjoints: {}", disjoints.join(", "));

        let json = serde_json::to_string_pretty(&onto.classes[h1c12.index()])
            .unwrap_or_else(|e| format!("JSON error: {e}"));
        println!("{json}");
    }
}
