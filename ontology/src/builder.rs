//! Incremental construction of an [`Ontology`].
//!
//! The builder seeds `owl:Thing` and the two property markers, validates every
//! handle it is given, and hands back the finished, read-only ontology from
//! [`OntologyBuilder::build`].

use crate::error::OntologyError;
use crate::model::iris::{OWL_THING, OWL_TOP_DATA_PROPERTY, OWL_TOP_OBJECT_PROPERTY};
use crate::model::{Class, Concept, Ontology, Property, PropertyDef, PropertyKind};

/// Builds an [`Ontology`] one axiom at a time.
///
/// ```
/// use ontoagg_ontology::OntologyBuilder;
///
/// let mut b = OntologyBuilder::new("https://example.org/topics/");
/// let science = b.class("Science", &[])?;
/// let physics = b.class("Physics", &[science])?;
/// let biology = b.class("Biology", &[science])?;
/// b.all_disjoint(&[physics, biology])?;
/// let has_topic = b.object_property("hasTopic", &[])?;
/// b.object_property("hasPrimaryTopic", &[has_topic])?;
/// let onto = b.build();
/// assert_eq!(onto.class_count(), 3);
/// assert_eq!(onto.property_count(), 2);
/// # Ok::<(), ontoagg_ontology::OntologyError>(())
/// ```
#[derive(Debug)]
pub struct OntologyBuilder {
    ontology: Ontology,
}

impl OntologyBuilder {
    /// Starts an ontology containing only `owl:Thing` and the property markers.
    #[must_use]
    pub fn new(base_iri: impl Into<String>) -> Self {
        Self {
            ontology: Ontology {
                base_iri: base_iri.into(),
                classes: vec![Class {
                    id: OWL_THING.to_string(),
                    label: "Thing".to_string(),
                    subclass_of: Vec::new(),
                    equivalent_to: Vec::new(),
                    disjoint_with: Vec::new(),
                }],
                properties: vec![
                    PropertyDef {
                        id: OWL_TOP_OBJECT_PROPERTY.to_string(),
                        label: "topObjectProperty".to_string(),
                        kind: PropertyKind::Object,
                        sub_property_of: Vec::new(),
                    },
                    PropertyDef {
                        id: OWL_TOP_DATA_PROPERTY.to_string(),
                        label: "topDataProperty".to_string(),
                        kind: PropertyKind::Datatype,
                        sub_property_of: Vec::new(),
                    },
                ],
                disjoint_groups: Vec::new(),
            },
        }
    }

    /// Declares a class under the given parents (`owl:Thing` when empty).
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::DuplicateIri`] if the name is taken and
    /// [`OntologyError::UnknownConcept`] for a foreign parent handle.
    pub fn class(&mut self, name: &str, parents: &[Concept]) -> Result<Concept, OntologyError> {
        let iri = self.iri(name);
        if self.ontology.classes.iter().any(|c| c.id == iri) {
            return Err(OntologyError::DuplicateIri(iri));
        }
        for &parent in parents {
            self.check_concept(parent)?;
        }
        Ok(self.insert_class(iri, name, parents))
    }

    /// Declares `a` and `b` equivalent (`owl:equivalentClass`).
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::UnknownConcept`] for a foreign handle.
    pub fn equivalent(&mut self, a: Concept, b: Concept) -> Result<(), OntologyError> {
        self.check_concept(a)?;
        self.check_concept(b)?;
        self.insert_equivalence(a, b);
        Ok(())
    }

    /// Declares an `owl:AllDisjointClasses` axiom over `members`.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::DegenerateDisjointGroup`] for fewer than two
    /// members, [`OntologyError::TopConceptDisjoint`] if `owl:Thing` is named,
    /// and [`OntologyError::UnknownConcept`] for a foreign handle.
    pub fn all_disjoint(&mut self, members: &[Concept]) -> Result<(), OntologyError> {
        if members.len() < 2 {
            return Err(OntologyError::DegenerateDisjointGroup(members.len()));
        }
        for &m in members {
            self.check_disjoint_member(m)?;
        }
        self.ontology.disjoint_groups.push(members.to_vec());
        Ok(())
    }

    /// Declares `a owl:disjointWith b`. Only `a` records the axiom.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::TopConceptDisjoint`] if either side is
    /// `owl:Thing` and [`OntologyError::UnknownConcept`] for a foreign handle.
    pub fn disjoint_with(&mut self, a: Concept, b: Concept) -> Result<(), OntologyError> {
        self.check_disjoint_member(a)?;
        self.check_disjoint_member(b)?;
        let class = &mut self.ontology.classes[a.index()];
        if !class.disjoint_with.contains(&b) {
            class.disjoint_with.push(b);
        }
        Ok(())
    }

    /// Declares an object property under the given parents
    /// (`owl:topObjectProperty` when empty).
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::DuplicateIri`], [`OntologyError::UnknownProperty`],
    /// or [`OntologyError::PropertyKindMismatch`] for a datatype parent.
    pub fn object_property(
        &mut self,
        name: &str,
        parents: &[Property],
    ) -> Result<Property, OntologyError> {
        self.property(name, PropertyKind::Object, parents)
    }

    /// Declares a datatype property under the given parents
    /// (`owl:topDataProperty` when empty).
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::DuplicateIri`], [`OntologyError::UnknownProperty`],
    /// or [`OntologyError::PropertyKindMismatch`] for an object parent.
    pub fn datatype_property(
        &mut self,
        name: &str,
        parents: &[Property],
    ) -> Result<Property, OntologyError> {
        self.property(name, PropertyKind::Datatype, parents)
    }

    /// Grows a regular classification tree under `owl:Thing`.
    ///
    /// Class names extend `prefix` with the 1-based child position at each
    /// level (`H1C1`, `H1C11`, `H1C12`, ...). When `disjoint` is set, every
    /// set of siblings becomes one `owl:AllDisjointClasses` axiom. Returns the
    /// created classes in depth-first order.
    ///
    /// # Errors
    ///
    /// Returns [`OntologyError::EmptyHierarchy`] when `levels` or `branching`
    /// is zero and [`OntologyError::DuplicateIri`] when a generated name is taken.
    pub fn hierarchy(
        &mut self,
        prefix: &str,
        levels: u32,
        branching: u32,
        disjoint: bool,
    ) -> Result<Vec<Concept>, OntologyError> {
        if levels == 0 || branching == 0 {
            return Err(OntologyError::EmptyHierarchy(prefix.to_string()));
        }
        let mut names = Vec::new();
        tree_names(prefix, levels, branching, &mut names);
        for name in &names {
            let iri = self.iri(name);
            if self.ontology.classes.iter().any(|c| c.id == iri) {
                return Err(OntologyError::DuplicateIri(iri));
            }
        }
        Ok(self.tree(prefix, levels, branching, disjoint))
    }

    /// Finishes construction.
    #[must_use]
    pub fn build(self) -> Ontology {
        self.ontology
    }

    /// Unchecked form of [`Self::hierarchy`]; callers guarantee fresh names.
    pub(crate) fn tree(
        &mut self,
        prefix: &str,
        levels: u32,
        branching: u32,
        disjoint: bool,
    ) -> Vec<Concept> {
        let mut created = Vec::new();
        self.grow(Concept::TOP, prefix, levels, branching, disjoint, &mut created);
        created
    }

    fn grow(
        &mut self,
        root: Concept,
        prefix: &str,
        levels: u32,
        branching: u32,
        disjoint: bool,
        created: &mut Vec<Concept>,
    ) {
        if levels == 0 {
            return;
        }
        let mut level = Vec::with_capacity(branching as usize);
        for i in 1..=branching {
            let name = format!("{prefix}{i}");
            let iri = self.iri(&name);
            let concept = self.insert_class(iri, &name, &[root]);
            created.push(concept);
            level.push(concept);
            self.grow(concept, &name, levels - 1, branching, disjoint, created);
        }
        if disjoint && level.len() > 1 {
            self.ontology.disjoint_groups.push(level);
        }
    }

    fn property(
        &mut self,
        name: &str,
        kind: PropertyKind,
        parents: &[Property],
    ) -> Result<Property, OntologyError> {
        let iri = self.iri(name);
        if self.ontology.properties.iter().any(|p| p.id == iri) {
            return Err(OntologyError::DuplicateIri(iri));
        }
        for &parent in parents {
            let def = self
                .ontology
                .property(parent)
                .ok_or(OntologyError::UnknownProperty(parent))?;
            if def.kind != kind {
                return Err(OntologyError::PropertyKindMismatch {
                    property: name.to_string(),
                    parent: def.label.clone(),
                });
            }
        }
        Ok(self.insert_property(iri, name, kind, parents))
    }

    pub(crate) fn insert_property(
        &mut self,
        iri: String,
        label: &str,
        kind: PropertyKind,
        parents: &[Property],
    ) -> Property {
        let sub_property_of = if parents.is_empty() {
            vec![kind.marker()]
        } else {
            parents.to_vec()
        };
        let handle = Property(self.ontology.properties.len() as u32);
        self.ontology.properties.push(PropertyDef {
            id: iri,
            label: label.to_string(),
            kind,
            sub_property_of,
        });
        handle
    }

    pub(crate) fn insert_class(&mut self, iri: String, label: &str, parents: &[Concept]) -> Concept {
        let subclass_of = if parents.is_empty() {
            vec![Concept::TOP]
        } else {
            parents.to_vec()
        };
        let handle = Concept(self.ontology.classes.len() as u32);
        self.ontology.classes.push(Class {
            id: iri,
            label: label.to_string(),
            subclass_of,
            equivalent_to: Vec::new(),
            disjoint_with: Vec::new(),
        });
        handle
    }

    pub(crate) fn insert_equivalence(&mut self, a: Concept, b: Concept) {
        if a == b {
            return;
        }
        if !self.ontology.classes[a.index()].equivalent_to.contains(&b) {
            self.ontology.classes[a.index()].equivalent_to.push(b);
        }
        if !self.ontology.classes[b.index()].equivalent_to.contains(&a) {
            self.ontology.classes[b.index()].equivalent_to.push(a);
        }
    }

    pub(crate) fn iri(&self, name: &str) -> String {
        format!("{}{}", self.ontology.base_iri, name)
    }

    fn check_concept(&self, concept: Concept) -> Result<(), OntologyError> {
        if concept.index() < self.ontology.classes.len() {
            Ok(())
        } else {
            Err(OntologyError::UnknownConcept(concept))
        }
    }

    fn check_disjoint_member(&self, concept: Concept) -> Result<(), OntologyError> {
        if concept.is_top() {
            return Err(OntologyError::TopConceptDisjoint);
        }
        self.check_concept(concept)
    }
}

fn tree_names(prefix: &str, levels: u32, branching: u32, out: &mut Vec<String>) {
    if levels == 0 {
        return;
    }
    for i in 1..=branching {
        let name = format!("{prefix}{i}");
        out.push(name.clone());
        tree_names(&name, levels - 1, branching, out);
    }
}
