//! Read-only concept and property hierarchies for statement aggregation.
//!
//! The `ontoagg-ontology` crate models an OWL-style hierarchy as typed Rust
//! data: classes linked by `rdfs:subClassOf`, `owl:equivalentClass`, and
//! disjointness axioms, plus a small property hierarchy linked by
//! `rdfs:subPropertyOf`. The [`HierarchyGraph`] trait is the query surface
//! reasoning code sees; [`Ontology`] implements it.
//!
//! # Entry Point
//!
//! ```
//! let onto = ontoagg_ontology::Ontology::small();
//! assert_eq!(onto.class_count(), 240 + 72 + 1);
//! ```
//!
//! # Building your own
//!
//! ```
//! use ontoagg_ontology::{HierarchyGraph, OntologyBuilder};
//!
//! let mut b = OntologyBuilder::new("https://example.org/");
//! let trees = b.hierarchy("T", 2, 2, true)?;
//! let onto = b.build();
//! assert_eq!(onto.concept_ancestors(trees[1]).len(), 3); // T11, T1, Thing
//! # Ok::<(), ontoagg_ontology::OntologyError>(())
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod builder;
pub mod error;
pub mod graph;
pub mod model;
pub mod samples;

pub use builder::OntologyBuilder;
pub use error::OntologyError;
pub use graph::HierarchyGraph;
pub use model::{Class, Concept, Ontology, Property, PropertyDef, PropertyKind};

impl Ontology {
    /// Returns the `small` sample: trees `H1C` (disjoint) and `H2C`, each
    /// four levels deep with branching 3, 72 synonyms, and `Item`.
    #[must_use]
    pub fn small() -> &'static Ontology {
        static ONTOLOGY: std::sync::OnceLock<Ontology> = std::sync::OnceLock::new();
        ONTOLOGY.get_or_init(|| samples::assemble(&samples::small::layout()))
    }

    /// Returns the `medium` sample: the `small` trees plus `H3C` (disjoint)
    /// and `H4C` with branching 4, and 276 synonyms.
    #[must_use]
    pub fn medium() -> &'static Ontology {
        static ONTOLOGY: std::sync::OnceLock<Ontology> = std::sync::OnceLock::new();
        ONTOLOGY.get_or_init(|| samples::assemble(&samples::medium::layout()))
    }

    /// Returns the `large` sample: the `medium` trees plus `H5C` to `H8C`,
    /// shaped like `H1C` to `H4C`, and 552 synonyms.
    #[must_use]
    pub fn large() -> &'static Ontology {
        static ONTOLOGY: std::sync::OnceLock<Ontology> = std::sync::OnceLock::new();
        ONTOLOGY.get_or_init(|| samples::assemble(&samples::large::layout()))
    }

    /// Looks up a built-in sample by name (`small`, `medium`, `large`).
    #[must_use]
    pub fn sample(name: &str) -> Option<&'static Ontology> {
        match name {
            "small" => Some(Self::small()),
            "medium" => Some(Self::medium()),
            "large" => Some(Self::large()),
            _ => None,
        }
    }
}
