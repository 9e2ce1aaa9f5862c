//! `large` sample: the `medium` trees repeated as `H5C` to `H8C`.
//!
//! Eight trees of depth 4. The odd-numbered ones are disjoint; `H1C`, `H2C`,
//! `H5C` and `H6C` branch 3, the others 4. 552 synonym classes.

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
    TreeLayout {
        prefix: "H5C",
        levels: 4,
        branching: 3,
        disjoint: true,
    },
    TreeLayout {
        prefix: "H6C",
        levels: 4,
        branching: 3,
        disjoint: false,
    },
    TreeLayout {
        prefix: "H7C",
        levels: 4,
        branching: 4,
        disjoint: true,
    },
    TreeLayout {
        prefix: "H8C",
        levels: 4,
        branching: 4,
        disjoint: false,
    },
];

/// Returns the `large` layout.
#[must_use]
pub fn layout() -> SampleLayout {
    SampleLayout {
        base_iri: "https://ontoagg.org/samples/large/",
        trees: TREES,
        synonym_stride: 7,
        synonym_anchor: 0,
    }
}
