//! Generalization of concepts, statements, and descriptions.
//!
//! Asserting that an item relates to a concept implies every generalization
//! of that assertion: the same relation to every ancestor concept, and the
//! more general relations to each of those. It also rules out every concept
//! disjoint with one of those ancestors.
//!
//! Two views are offered:
//!
//! - [`generalize_statement`] answers "what does this assertion imply and
//!   exclude", one property level up, and drives belief propagation.
//! - [`statement_generalizations`] enumerates every implied statement with a
//!   loss level, and drives redundancy elimination and the distance metric.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ontoagg_ontology::{Concept, HierarchyGraph, Property};
use tracing::trace;

use crate::hierarchy::HierarchyIndex;
use crate::statement::{Generalization, Statement};

/// What asserting a concept implies and excludes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Every ancestor of the concept, itself and the universal concept included.
    pub positive: Vec<Concept>,
    /// Every concept disjoint with a non-universal ancestor. Without repeats.
    pub negative: Vec<Concept>,
}

/// What asserting a statement implies and excludes, as property/concept pairs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatementPropagation {
    /// Pairs the assertion implies.
    pub positive: Vec<(Property, Concept)>,
    /// Pairs the assertion excludes.
    pub negative: Vec<(Property, Concept)>,
}

/// Returns the concepts asserting `concept` implies and excludes.
///
/// The positive side is the ancestor set. The negative side is, for every
/// ancestor other than the universal concept, its disjoint concepts minus the
/// ancestor itself.
pub fn propagate<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    concept: Concept,
) -> Arc<Propagation> {
    index
        .propagations
        .get_or_compute(concept, index.policy(), || {
            let positive = index.ancestors(concept).to_vec();
            let top = index.top_concept();
            let mut seen = HashSet::new();
            let mut negative = Vec::new();
            for &ancestor in positive.iter().filter(|&&a| a != top) {
                for &d in index.disjoints_of(ancestor).iter() {
                    if d != ancestor && seen.insert(d) {
                        negative.push(d);
                    }
                }
            }
            trace!(
                concept = concept.raw(),
                positive = positive.len(),
                negative = negative.len(),
                "propagated"
            );
            Arc::new(Propagation { positive, negative })
        })
}

/// Returns the property/concept pairs an assertion of
/// `(property, concept)` implies and excludes.
///
/// Properties considered are `property` and its direct super-properties,
/// never a universal marker. Each is paired with every concept of
/// [`propagate`]'s positive and negative sides.
pub fn generalize_statement<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    property: Property,
    concept: Concept,
) -> StatementPropagation {
    let propagation = propagate(index, concept);
    let properties: Vec<Property> = std::iter::once(property)
        .chain(index.super_properties(property).iter().copied())
        .filter(|&p| !index.is_top_property(p))
        .collect();

    let pairs = |concepts: &[Concept]| -> Vec<(Property, Concept)> {
        properties
            .iter()
            .flat_map(|&p| concepts.iter().map(move |&c| (p, c)))
            .collect()
    };
    StatementPropagation {
        positive: pairs(&propagation.positive),
        negative: pairs(&propagation.negative),
    }
}

/// Loss levels along the property axis: `property` and its transitive
/// super-properties, most specific first.
///
/// A property's loss is the depth of `property` minus its own depth, so
/// `property` itself sits at 0 and each step up the chain costs one level
/// per hierarchy level skipped.
pub fn property_losses<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    property: Property,
) -> Arc<[(Property, u32)]> {
    index
        .property_losses
        .get_or_compute(property, index.policy(), || {
            let chain = index.property_chain(property);
            let depths: Vec<u32> = chain.iter().map(|&p| index.property_depth(p)).collect();
            let deepest = depths.iter().copied().max().unwrap_or(0);
            let mut out: Vec<(Property, u32)> = chain
                .into_iter()
                .zip(depths)
                .map(|(p, d)| (p, deepest.saturating_sub(d)))
                .collect();
            out.sort_by_key(|&(_, loss)| loss);
            out.into()
        })
}

/// Loss levels along the concept axis: every ancestor of `concept`, most
/// specific first.
///
/// Ancestors are ranked by the size of their own ancestor set. The most
/// specific rank is level 0; each strictly smaller set opens the next level.
/// Equivalent concepts share a rank and therefore a level.
pub fn concept_losses<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    concept: Concept,
) -> Arc<[(Concept, u32)]> {
    index
        .concept_losses
        .get_or_compute(concept, index.policy(), || {
            let mut ranked: Vec<(Concept, usize)> = index
                .ancestors(concept)
                .iter()
                .map(|&a| (a, index.ancestor_count(a)))
                .collect();
            ranked.sort_by(|a, b| b.1.cmp(&a.1));

            let mut out = Vec::with_capacity(ranked.len());
            let mut level = 0u32;
            let mut previous = None;
            for (c, count) in ranked {
                if previous.is_some_and(|p| p != count) {
                    level += 1;
                }
                previous = Some(count);
                out.push((c, level));
            }
            out.into()
        })
}

/// Every statement `statement` implies, with its loss.
///
/// The product of [`property_losses`] and [`concept_losses`]; a pair's loss
/// is the sum of its two levels. The statement itself comes first, at loss 0.
/// The returned iterator is lazy and can be cloned to restart it.
pub fn statement_generalizations<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    statement: &Statement,
) -> StatementGeneralizations {
    StatementGeneralizations {
        base: statement.clone(),
        properties: property_losses(index, statement.property),
        concepts: concept_losses(index, statement.concept),
        next: 0,
    }
}

/// Iterator returned by [`statement_generalizations`].
#[derive(Debug, Clone)]
pub struct StatementGeneralizations {
    base: Statement,
    properties: Arc<[(Property, u32)]>,
    concepts: Arc<[(Concept, u32)]>,
    next: usize,
}

impl Iterator for StatementGeneralizations {
    type Item = Generalization;

    fn next(&mut self) -> Option<Generalization> {
        let width = self.concepts.len();
        if width == 0 {
            return None;
        }
        let &(property, property_loss) = self.properties.get(self.next / width)?;
        let &(concept, concept_loss) = self.concepts.get(self.next % width)?;
        self.next += 1;
        Some(Generalization {
            statement: self.base.with(property, concept),
            loss: property_loss + concept_loss,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.properties.len() * self.concepts.len();
        let left = total.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for StatementGeneralizations {}

/// Every statement a description implies, with the smallest loss at which
/// any of its statements reaches it.
///
/// Keys keep the subject of the statement they came from.
pub fn description_generalizations<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    description: &[Statement],
) -> HashMap<Statement, u32> {
    let mut table: HashMap<Statement, u32> = HashMap::new();
    for statement in description {
        for g in statement_generalizations(index, statement) {
            table
                .entry(g.statement)
                .and_modify(|loss| *loss = (*loss).min(g.loss))
                .or_insert(g.loss);
        }
    }
    table
}
