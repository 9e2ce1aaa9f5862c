//! `medium` sample: the `small` trees plus two wider trees of branching 4.
//!
//! `H1C` and `H3C` are disjoint; `H2C` and `H4C` are not. 276 synonym
//! classes, with `S222 ≡ H1C1`.

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
    TreeLayout {
        prefix: "H3C",
        levels: 4,
        branching: 4,
        disjoint: true,
    },
    TreeLayout {
        prefix: "H4C",
        levels: 4,
        branching: 4,
        disjoint: false,
    },
];

/// Returns the `medium` layout.
#[must_use]
pub fn layout() -> SampleLayout {
    SampleLayout {
        base_iri: "https://ontoagg.org/samples/medium/",
        trees: TREES,
        synonym_stride: 9,
        synonym_anchor: 222,
    }
}
