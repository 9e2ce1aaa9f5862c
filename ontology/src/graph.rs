//! The read-only query surface a hierarchy exposes to reasoning code.
//!
//! [`HierarchyGraph`] is the seam between hierarchy storage and the
//! generalization engine. The engine only ever asks four questions: which
//! concepts subsume a concept, which concepts a concept is declared disjoint
//! with, which properties a property directly specializes, and how deep a
//! property sits in its hierarchy.

use std::collections::{HashSet, VecDeque};

use crate::model::{Concept, Ontology, Property};

/// Read-only access to a concept hierarchy and a property hierarchy.
///
/// Implementations must be pure: the same question always gets the same
/// answer for the lifetime of the value, so callers may memoize freely.
pub trait HierarchyGraph {
    /// The universal concept.
    fn top_concept(&self) -> Concept {
        Concept::TOP
    }

    /// True for the universal property markers.
    fn is_top_property(&self, property: Property) -> bool {
        property.is_marker()
    }

    /// Every concept subsuming `concept`, transitively, including `concept`
    /// itself, its equivalents, and the universal concept.
    fn concept_ancestors(&self, concept: Concept) -> Vec<Concept>;

    /// Concepts declared disjoint with `concept`, as stored. May be
    /// one-directional; never contains `concept` itself.
    fn concept_disjoints(&self, concept: Concept) -> Vec<Concept>;

    /// Direct parents of `property`, markers included.
    fn super_properties(&self, property: Property) -> Vec<Property>;

    /// Every concept handle in the hierarchy.
    fn all_concepts(&self) -> Vec<Concept>;

    /// Every property handle in the hierarchy, markers included.
    fn all_properties(&self) -> Vec<Property>;

    /// Length of the longest parent chain from `property` down to a marker:
    /// markers sit at depth 0, root properties at depth 1.
    fn property_depth(&self, property: Property) -> u32 {
        if self.is_top_property(property) {
            return 0;
        }
        1 + self
            .super_properties(property)
            .into_iter()
            .filter(|&p| p != property)
            .map(|p| self.property_depth(p))
            .max()
            .unwrap_or(0)
    }
}

impl HierarchyGraph for Ontology {
    fn concept_ancestors(&self, concept: Concept) -> Vec<Concept> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([concept]);
        while let Some(c) = queue.pop_front() {
            if !seen.insert(c) {
                continue;
            }
            order.push(c);
            if let Some(class) = self.class(c) {
                queue.extend(class.subclass_of.iter().copied());
                queue.extend(class.equivalent_to.iter().copied());
            }
        }
        if seen.insert(Concept::TOP) {
            order.push(Concept::TOP);
        }
        order
    }

    fn concept_disjoints(&self, concept: Concept) -> Vec<Concept> {
        if concept.is_top() {
            return Vec::new();
        }
        let mut out: Vec<Concept> = self
            .disjoint_groups
            .iter()
            .filter(|group| group.contains(&concept))
            .flat_map(|group| group.iter().copied())
            .chain(
                self.class(concept)
                    .into_iter()
                    .flat_map(|c| c.disjoint_with.iter().copied()),
            )
            .filter(|&d| d != concept)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    fn super_properties(&self, property: Property) -> Vec<Property> {
        self.property(property)
            .map(|p| p.sub_property_of.clone())
            .unwrap_or_default()
    }

    fn all_concepts(&self) -> Vec<Concept> {
        self.concepts().collect()
    }

    fn all_properties(&self) -> Vec<Property> {
        self.property_handles().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OntologyBuilder;

    fn tiny() -> (Ontology, [Concept; 4]) {
        let mut b = OntologyBuilder::new("https://example.org/");
        let a = b.class("A", &[]).unwrap();
        let a1 = b.class("A1", &[a]).unwrap();
        let a2 = b.class("A2", &[a]).unwrap();
        let s = b.class("S", &[]).unwrap();
        b.equivalent(s, a).unwrap();
        b.all_disjoint(&[a1, a2]).unwrap();
        (b.build(), [a, a1, a2, s])
    }

    #[test]
    fn ancestors_include_self_equivalents_and_top() {
        let (onto, [a, a1, _, s]) = tiny();
        let mut anc = onto.concept_ancestors(a1);
        anc.sort_unstable();
        let mut expected = vec![Concept::TOP, a, a1, s];
        expected.sort_unstable();
        assert_eq!(anc, expected);
        assert_eq!(anc.len(), 4);
        assert_eq!(onto.concept_ancestors(Concept::TOP), vec![Concept::TOP]);
    }

    #[test]
    fn disjoints_come_from_groups() {
        let (onto, [a, a1, a2, _]) = tiny();
        assert_eq!(onto.concept_disjoints(a1), vec![a2]);
        assert_eq!(onto.concept_disjoints(a2), vec![a1]);
        assert!(onto.concept_disjoints(a).is_empty());
        assert!(onto.concept_disjoints(Concept::TOP).is_empty());
    }

    #[test]
    fn pairwise_disjointness_is_stored_one_way() {
        let mut b = OntologyBuilder::new("https://example.org/");
        let x = b.class("X", &[]).unwrap();
        let y = b.class("Y", &[]).unwrap();
        b.disjoint_with(x, y).unwrap();
        let onto = b.build();
        assert_eq!(onto.concept_disjoints(x), vec![y]);
        assert!(onto.concept_disjoints(y).is_empty());
    }

    #[test]
    fn property_depth_counts_from_marker() {
        let mut b = OntologyBuilder::new("https://example.org/");
        let t = b.object_property("hasTopic", &[]).unwrap();
        let pt = b.object_property("hasPrimaryTopic", &[t]).unwrap();
        let onto = b.build();
        assert_eq!(onto.property_depth(Property::TOP_OBJECT), 0);
        assert_eq!(onto.property_depth(t), 1);
        assert_eq!(onto.property_depth(pt), 2);
        assert_eq!(onto.super_properties(pt), vec![t]);
        assert_eq!(onto.super_properties(t), vec![Property::TOP_OBJECT]);
    }
}
