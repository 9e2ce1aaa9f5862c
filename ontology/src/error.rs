//! Errors raised while assembling an ontology.

use crate::model::{Concept, Property};

/// A rejected builder operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OntologyError {
    /// A class or property with this IRI already exists.
    #[error("duplicate IRI: {0}")]
    DuplicateIri(String),

    /// A concept handle does not belong to the ontology under construction.
    #[error("unknown concept handle {}", .0.raw())]
    UnknownConcept(Concept),

    /// A property handle does not belong to the ontology under construction.
    #[error("unknown property handle {}", .0.raw())]
    UnknownProperty(Property),

    /// A sub-property was declared under a parent of the other kind.
    #[error("property `{property}` cannot specialize `{parent}`: object and datatype properties do not mix")]
    PropertyKindMismatch {
        /// Local name of the new property.
        property: String,
        /// Local name of the rejected parent.
        parent: String,
    },

    /// An `owl:AllDisjointClasses` axiom with fewer than two members.
    #[error("a disjoint group needs at least two members, got {0}")]
    DegenerateDisjointGroup(usize),

    /// `owl:Thing` was named in a disjointness axiom.
    #[error("owl:Thing cannot take part in a disjointness axiom")]
    TopConceptDisjoint,

    /// A generated hierarchy with no levels or no branches.
    #[error("hierarchy `{0}` needs at least one level and a branching factor of at least one")]
    EmptyHierarchy(String),
}
