//! Built-in sample ontologies.
//!
//! Each sub-module describes one sample as a [`SampleLayout`]: a list of
//! regular classification trees, a synonym plan, and the shared item class
//! and topic properties. See [`crate::Ontology::small`] and friends for the
//! cached entry points.

pub mod large;
pub mod medium;
pub mod small;

use crate::builder::OntologyBuilder;
use crate::model::{Ontology, PropertyKind};

/// Local-name prefix of synonym classes.
pub const SYNONYM_PREFIX: &str = "S";

/// Share of tree classes that receive a synonym, in tenths.
const SYNONYM_TENTHS: usize = 3;

/// One regular classification tree rooted at `owl:Thing`.
#[derive(Debug, Clone, Copy)]
pub struct TreeLayout {
    /// Name prefix, e.g. `"H1C"`.
    pub prefix: &'static str,
    /// Depth of the tree.
    pub levels: u32,
    /// Children per inner node.
    pub branching: u32,
    /// Whether each sibling set is declared `owl:AllDisjointClasses`.
    pub disjoint: bool,
}

/// Shape of a sample ontology.
#[derive(Debug, Clone, Copy)]
pub struct SampleLayout {
    /// Base IRI.
    pub base_iri: &'static str,
    /// Trees in declaration order.
    pub trees: &'static [TreeLayout],
    /// Synonym `S<n>` is equivalent to tree class `(n - anchor) * stride mod len`.
    pub synonym_stride: i64,
    /// See `synonym_stride`; synonym `S<anchor>` lands on the first tree class.
    pub synonym_anchor: i64,
}

/// Assembles the ontology a layout describes.
///
/// Class handles follow declaration order: trees depth-first, then synonyms,
/// then `Item`. The property hierarchy is the same for every sample:
/// `hasPrimaryTopic ⊑ hasTopic` and `hasP11, hasP12 ⊑ hasP1`.
#[must_use]
pub fn assemble(layout: &SampleLayout) -> Ontology {
    let mut b = OntologyBuilder::new(layout.base_iri);

    let mut tree_classes = Vec::new();
    for tree in layout.trees {
        tree_classes.extend(b.tree(tree.prefix, tree.levels, tree.branching, tree.disjoint));
    }

    let len = tree_classes.len() as i64;
    let synonyms = tree_classes.len() * SYNONYM_TENTHS / 10;
    for n in 0..synonyms {
        let name = format!("{SYNONYM_PREFIX}{n}");
        let iri = b.iri(&name);
        let synonym = b.insert_class(iri, &name, &[]);
        let target = ((n as i64 - layout.synonym_anchor) * layout.synonym_stride).rem_euclid(len);
        b.insert_equivalence(synonym, tree_classes[target as usize]);
    }

    let iri = b.iri("Item");
    b.insert_class(iri, "Item", &[]);

    let iri = b.iri("hasTopic");
    let has_topic = b.insert_property(iri, "hasTopic", PropertyKind::Object, &[]);
    let iri = b.iri("hasPrimaryTopic");
    b.insert_property(iri, "hasPrimaryTopic", PropertyKind::Object, &[has_topic]);
    let iri = b.iri("hasP1");
    let has_p1 = b.insert_property(iri, "hasP1", PropertyKind::Object, &[]);
    let iri = b.iri("hasP11");
    b.insert_property(iri, "hasP11", PropertyKind::Object, &[has_p1]);
    let iri = b.iri("hasP12");
    b.insert_property(iri, "hasP12", PropertyKind::Object, &[has_p1]);

    b.build()
}

/// Number of classes in a full tree of the given shape.
#[must_use]
pub fn tree_size(levels: u32, branching: u32) -> usize {
    (1..=levels).map(|l| (branching as usize).pow(l)).sum()
}
