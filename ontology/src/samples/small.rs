//! `small` sample: two classification trees of depth 4, branching 3.
//!
//! `H1C` is fully disjoint (every sibling set excludes itself); `H2C` is a
//! plain subsumption tree. 72 synonym classes, with `S26 ≡ H1C1`.

use super::{SampleLayout, TreeLayout};

const TREES: &[TreeLayout] = &[
    TreeLayout {
        prefix: "H1C",
        levels: 4,
        branching: 3,
        disjoint: true,
    },
    TreeLayout {
        prefix: "H2C",
        levels: 4,
        branching: 3,
        disjoint: false,
    },
];

/// Returns the `small` layout.
#[must_use]
pub fn layout() -> SampleLayout {
    SampleLayout {
        base_iri: "https://ontoagg.org/samples/small/",
        trees: TREES,
        synonym_stride: 31,
        synonym_anchor: 26,
    }
}
