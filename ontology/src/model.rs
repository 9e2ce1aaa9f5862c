//! Core hierarchy model types.
//!
//! These types represent a concept hierarchy and a property hierarchy as
//! typed Rust data. Concepts and properties are addressed by dense integer
//! handles; every handle indexes straight into the owning [`Ontology`]'s
//! `classes` or `properties` vector.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle of a concept (an OWL class) inside one [`Ontology`].
///
/// Handle `0` is always the universal concept `owl:Thing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Concept(pub(crate) u32);

impl Concept {
    /// The universal concept (`owl:Thing`).
    pub const TOP: Self = Self(0);

    /// Creates a handle from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the handle as a vector index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for the universal concept.
    #[inline]
    #[must_use]
    pub const fn is_top(self) -> bool {
        self.0 == Self::TOP.0
    }
}

/// Handle of a property inside one [`Ontology`].
///
/// Handles `0` and `1` are the universal object and datatype property
/// markers. They root the property hierarchy and never take part in
/// generalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Property(pub(crate) u32);

impl Property {
    /// The universal object property marker (`owl:topObjectProperty`).
    pub const TOP_OBJECT: Self = Self(0);

    /// The universal datatype property marker (`owl:topDataProperty`).
    pub const TOP_DATA: Self = Self(1);

    /// Creates a handle from a raw index.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns the handle as a vector index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns true for either universal property marker.
    #[inline]
    #[must_use]
    pub const fn is_marker(self) -> bool {
        self.0 == Self::TOP_OBJECT.0 || self.0 == Self::TOP_DATA.0
    }
}

/// Whether a property relates an item to a resource or to a literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PropertyKind {
    /// `owl:ObjectProperty`: relates two resources.
    Object,
    /// `owl:DatatypeProperty`: relates a resource to a literal.
    Datatype,
}

impl PropertyKind {
    /// Returns the OWL term naming this kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKind::Object => "owl:ObjectProperty",
            PropertyKind::Datatype => "owl:DatatypeProperty",
        }
    }

    /// Returns the universal marker every root property of this kind hangs under.
    #[must_use]
    pub fn marker(self) -> Property {
        match self {
            PropertyKind::Object => Property::TOP_OBJECT,
            PropertyKind::Datatype => Property::TOP_DATA,
        }
    }
}

/// An OWL class definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Class {
    /// Full IRI.
    pub id: String,
    /// Local name (e.g., `"H1C12"`).
    pub label: String,
    /// Direct parents (`rdfs:subClassOf`). Empty only for `owl:Thing`.
    pub subclass_of: Vec<Concept>,
    /// Declared equivalents (`owl:equivalentClass`), stored on both sides.
    pub equivalent_to: Vec<Concept>,
    /// Pairwise exclusions (`owl:disjointWith`), stored on the declaring side only.
    pub disjoint_with: Vec<Concept>,
}

/// An OWL property definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PropertyDef {
    /// Full IRI.
    pub id: String,
    /// Local name (e.g., `"hasPrimaryTopic"`).
    pub label: String,
    /// Object or datatype property.
    pub kind: PropertyKind,
    /// Direct parents (`rdfs:subPropertyOf`). Empty only for the two markers.
    pub sub_property_of: Vec<Property>,
}

/// A complete concept and property hierarchy.
///
/// Built once (see [`crate::OntologyBuilder`]) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ontology {
    /// Base IRI; class and property IRIs are this prefix plus the local name.
    pub base_iri: String,
    /// All classes, indexed by [`Concept`]. Index 0 is `owl:Thing`.
    pub classes: Vec<Class>,
    /// All properties, indexed by [`Property`]. Indexes 0 and 1 are the markers.
    pub properties: Vec<PropertyDef>,
    /// `owl:AllDisjointClasses` axioms: every member excludes every other member.
    pub disjoint_groups: Vec<Vec<Concept>>,
}

impl Ontology {
    /// Looks up a class by full IRI or local name. Returns `None` if not found.
    #[must_use]
    pub fn find_class(&self, name: &str) -> Option<Concept> {
        self.classes
            .iter()
            .position(|c| c.id == name || c.label == name)
            .map(|i| Concept(i as u32))
    }

    /// Looks up a property by full IRI or local name. Returns `None` if not found.
    #[must_use]
    pub fn find_property(&self, name: &str) -> Option<Property> {
        self.properties
            .iter()
            .position(|p| p.id == name || p.label == name)
            .map(|i| Property(i as u32))
    }

    /// Returns the class behind a handle, or `None` for a foreign handle.
    #[must_use]
    pub fn class(&self, concept: Concept) -> Option<&Class> {
        self.classes.get(concept.index())
    }

    /// Returns the property behind a handle, or `None` for a foreign handle.
    #[must_use]
    pub fn property(&self, property: Property) -> Option<&PropertyDef> {
        self.properties.get(property.index())
    }

    /// Local name of a concept, `"?"` for a foreign handle.
    #[must_use]
    pub fn concept_label(&self, concept: Concept) -> &str {
        self.class(concept).map_or("?", |c| c.label.as_str())
    }

    /// Local name of a property, `"?"` for a foreign handle.
    #[must_use]
    pub fn property_label(&self, property: Property) -> &str {
        self.property(property).map_or("?", |p| p.label.as_str())
    }

    /// Iterates over every concept handle, `owl:Thing` first.
    pub fn concepts(&self) -> impl Iterator<Item = Concept> + '_ {
        (0..self.classes.len() as u32).map(Concept)
    }

    /// Iterates over every property handle, markers first.
    pub fn property_handles(&self) -> impl Iterator<Item = Property> + '_ {
        (0..self.properties.len() as u32).map(Property)
    }

    /// Returns the number of declared classes, excluding `owl:Thing`.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.classes.len().saturating_sub(1)
    }

    /// Returns the number of declared properties, excluding the two markers.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.properties.len().saturating_sub(2)
    }

    /// Returns the number of `owl:AllDisjointClasses` axioms.
    #[must_use]
    pub fn disjoint_group_count(&self) -> usize {
        self.disjoint_groups.len()
    }

    /// Returns the number of classes carrying at least one equivalence.
    #[must_use]
    pub fn equivalence_count(&self) -> usize {
        self.classes
            .iter()
            .filter(|c| !c.equivalent_to.is_empty())
            .count()
    }
}

/// Standard IRI constants.
pub mod iris {
    /// OWL namespace.
    pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
    /// `owl:Thing`.
    pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
    /// `owl:topObjectProperty`.
    pub const OWL_TOP_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topObjectProperty";
    /// `owl:topDataProperty`.
    pub const OWL_TOP_DATA_PROPERTY: &str = "http://www.w3.org/2002/07/owl#topDataProperty";
}
