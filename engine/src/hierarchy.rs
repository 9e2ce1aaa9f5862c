//! Memoized hierarchy queries.
//!
//! [`HierarchyIndex`] wraps a [`HierarchyGraph`] and caches every answer the
//! engine asks for: ancestor sets, symmetric disjoint sets, property chains,
//! propagation results, and loss tables. Each cache is a sharded concurrent
//! map, so one index can be shared by reference across threads and warmed
//! once up front.

use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use ontoagg_ontology::{Concept, HierarchyGraph, Property};
use tracing::debug;

use crate::generalization::{self, Propagation};

/// How large the memo tables may grow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CachePolicy {
    /// Keep every answer for the lifetime of the index.
    #[default]
    Unbounded,
    /// Keep at most this many entries per table; a full table is cleared
    /// before the next insert. `Capped(0)` disables memoization.
    Capped(usize),
}

/// Hit, miss, and size counters summed over every memo table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from a table.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
    /// Entries currently held.
    pub entries: usize,
}

/// One memo table.
pub(crate) struct Memo<K, V> {
    name: &'static str,
    table: DashMap<K, V>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<K: Eq + Hash + Copy, V: Clone> Memo<K, V> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            table: DashMap::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Returns the cached answer for `key`, computing and storing it on a miss.
    ///
    /// `compute` runs with no shard lock held, so it may query other tables
    /// of the same index, or this one for a different key.
    pub(crate) fn get_or_compute(
        &self,
        key: K,
        policy: CachePolicy,
        compute: impl FnOnce() -> V,
    ) -> V {
        if let Some(v) = self.table.get(&key).map(|r| r.value().clone()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return v;
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let v = compute();
        match policy {
            CachePolicy::Unbounded => {
                self.table.insert(key, v.clone());
            }
            CachePolicy::Capped(0) => {}
            CachePolicy::Capped(cap) => {
                if self.table.len() >= cap {
                    debug!(table = self.name, entries = cap, "memo table full, clearing");
                    self.table.clear();
                }
                self.table.insert(key, v.clone());
            }
        }
        v
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.table.len(),
        }
    }

    fn clear(&self) {
        self.table.clear();
    }
}

/// Memoized, thread-safe view of a concept and property hierarchy.
///
/// All lookups take `&self`. The index borrows its graph, so the graph
/// outlives every cached answer and cannot change underneath them.
pub struct HierarchyIndex<'g, G: ?Sized> {
    graph: &'g G,
    policy: CachePolicy,
    reverse_disjoints: OnceLock<HashMap<Concept, Vec<Concept>>>,
    ancestors: Memo<Concept, Arc<[Concept]>>,
    disjoints: Memo<Concept, Arc<[Concept]>>,
    super_properties: Memo<Property, Arc<[Property]>>,
    pub(crate) propagations: Memo<Concept, Arc<Propagation>>,
    pub(crate) concept_losses: Memo<Concept, Arc<[(Concept, u32)]>>,
    pub(crate) property_losses: Memo<Property, Arc<[(Property, u32)]>>,
}

impl<'g, G: HierarchyGraph + ?Sized> HierarchyIndex<'g, G> {
    /// Creates an index with unbounded memo tables.
    #[must_use]
    pub fn new(graph: &'g G) -> Self {
        Self::with_policy(graph, CachePolicy::Unbounded)
    }

    /// Creates an index with the given memo policy.
    #[must_use]
    pub fn with_policy(graph: &'g G, policy: CachePolicy) -> Self {
        Self {
            graph,
            policy,
            reverse_disjoints: OnceLock::new(),
            ancestors: Memo::new("ancestors"),
            disjoints: Memo::new("disjoints"),
            super_properties: Memo::new("super_properties"),
            propagations: Memo::new("propagations"),
            concept_losses: Memo::new("concept_losses"),
            property_losses: Memo::new("property_losses"),
        }
    }

    /// The wrapped graph.
    #[must_use]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// The memo policy.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// The universal concept.
    #[must_use]
    pub fn top_concept(&self) -> Concept {
        self.graph.top_concept()
    }

    /// True for a universal property marker.
    #[must_use]
    pub fn is_top_property(&self, property: Property) -> bool {
        self.graph.is_top_property(property)
    }

    /// Every concept subsuming `concept`: itself, its equivalents, every
    /// transitive superclass, and the universal concept.
    #[must_use]
    pub fn ancestors(&self, concept: Concept) -> Arc<[Concept]> {
        self.ancestors.get_or_compute(concept, self.policy, || {
            let mut out = self.graph.concept_ancestors(concept);
            let top = self.graph.top_concept();
            if !out.contains(&concept) {
                out.insert(0, concept);
            }
            if !out.contains(&top) {
                out.push(top);
            }
            out.into()
        })
    }

    /// Size of the ancestor set, with the universal concept counted as
    /// having no ancestors at all.
    #[must_use]
    pub fn ancestor_count(&self, concept: Concept) -> usize {
        if concept == self.graph.top_concept() {
            0
        } else {
            self.ancestors(concept).len()
        }
    }

    /// Concepts disjoint with `concept`, in either declared direction.
    ///
    /// Sorted, never contains `concept`, and empty for the universal concept.
    #[must_use]
    pub fn disjoints_of(&self, concept: Concept) -> Arc<[Concept]> {
        self.disjoints.get_or_compute(concept, self.policy, || {
            if concept == self.graph.top_concept() {
                return Arc::from([]);
            }
            let reverse = self.reverse_disjoints();
            let mut out: Vec<Concept> = self
                .graph
                .concept_disjoints(concept)
                .into_iter()
                .chain(reverse.get(&concept).into_iter().flatten().copied())
                .filter(|&d| d != concept)
                .collect();
            out.sort_unstable();
            out.dedup();
            out.into()
        })
    }

    /// Direct super-properties of `property`, markers excluded.
    #[doc(alias = "sub_properties")]
    #[must_use]
    pub fn super_properties(&self, property: Property) -> Arc<[Property]> {
        self.super_properties.get_or_compute(property, self.policy, || {
            self.graph
                .super_properties(property)
                .into_iter()
                .filter(|&p| p != property && !self.graph.is_top_property(p))
                .collect()
        })
    }

    /// `property` followed by every transitive super-property, markers
    /// excluded. Breadth-first, without repeats.
    #[must_use]
    pub fn property_chain(&self, property: Property) -> Vec<Property> {
        let mut seen = HashSet::from([property]);
        let mut chain = vec![property];
        let mut queue = VecDeque::from([property]);
        while let Some(p) = queue.pop_front() {
            for &parent in self.super_properties(p).iter() {
                if seen.insert(parent) {
                    chain.push(parent);
                    queue.push_back(parent);
                }
            }
        }
        chain
    }

    /// Distance from `property` down to a marker along its longest chain.
    #[must_use]
    pub fn property_depth(&self, property: Property) -> u32 {
        self.graph.property_depth(property)
    }

    /// Fills every memo table for every concept and property of the graph.
    ///
    /// Under [`CachePolicy::Capped`] later entries may evict earlier ones.
    pub fn warm(&self) {
        let concepts = self.graph.all_concepts();
        let properties = self.graph.all_properties();
        for &c in &concepts {
            let _ = generalization::propagate(self, c);
            let _ = generalization::concept_losses(self, c);
        }
        for &p in &properties {
            let _ = generalization::property_losses(self, p);
        }
        debug!(
            concepts = concepts.len(),
            properties = properties.len(),
            entries = self.cache_stats().entries,
            "hierarchy index warmed"
        );
    }

    /// Counters summed over every memo table.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        [
            self.ancestors.stats(),
            self.disjoints.stats(),
            self.super_properties.stats(),
            self.propagations.stats(),
            self.concept_losses.stats(),
            self.property_losses.stats(),
        ]
        .into_iter()
        .fold(CacheStats::default(), |acc, s| CacheStats {
            hits: acc.hits + s.hits,
            misses: acc.misses + s.misses,
            entries: acc.entries + s.entries,
        })
    }

    /// Drops every memoized answer. Counters are kept.
    pub fn clear(&self) {
        self.ancestors.clear();
        self.disjoints.clear();
        self.super_properties.clear();
        self.propagations.clear();
        self.concept_losses.clear();
        self.property_losses.clear();
    }

    /// For every concept, the concepts that declare it disjoint.
    fn reverse_disjoints(&self) -> &HashMap<Concept, Vec<Concept>> {
        self.reverse_disjoints.get_or_init(|| {
            let mut reverse: HashMap<Concept, Vec<Concept>> = HashMap::new();
            for c in self.graph.all_concepts() {
                for d in self.graph.concept_disjoints(c) {
                    reverse.entry(d).or_default().push(c);
                }
            }
            reverse
        })
    }
}

impl<G: ?Sized> std::fmt::Debug for HierarchyIndex<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyIndex")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoagg_ontology::{Ontology, OntologyBuilder};

    fn names(onto: &Ontology, cs: &[Concept]) -> Vec<String> {
        let mut v: Vec<String> = cs.iter().map(|&c| onto.concept_label(c).to_owned()).collect();
        v.sort();
        v
    }

    #[test]
    fn ancestors_match_the_graph() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        let h1c12 = onto.find_class("H1C12").unwrap();
        assert_eq!(
            names(onto, &index.ancestors(h1c12)),
            ["H1C1", "H1C12", "S26", "Thing"]
        );
        assert_eq!(index.ancestor_count(h1c12), 4);
        assert_eq!(index.ancestor_count(Concept::TOP), 0);
    }

    #[test]
    fn one_way_disjointness_is_symmetric_in_the_index() {
        let mut b = OntologyBuilder::new("https://example.org/");
        let x = b.class("X", &[]).unwrap();
        let y = b.class("Y", &[]).unwrap();
        b.disjoint_with(x, y).unwrap();
        let onto = b.build();
        let index = HierarchyIndex::new(&onto);
        assert_eq!(&*index.disjoints_of(x), &[y]);
        assert_eq!(&*index.disjoints_of(y), &[x]);
        assert!(index.disjoints_of(Concept::TOP).is_empty());
    }

    #[test]
    fn super_properties_skip_markers() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        let t = onto.find_property("hasTopic").unwrap();
        let pt = onto.find_property("hasPrimaryTopic").unwrap();
        assert_eq!(&*index.super_properties(pt), &[t]);
        assert!(index.super_properties(t).is_empty());
        assert_eq!(index.property_chain(pt), vec![pt, t]);
        assert_eq!(index.property_depth(pt), 2);
    }

    #[test]
    fn second_lookup_hits() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        let c = onto.find_class("H2C22").unwrap();
        let first = index.ancestors(c);
        let second = index.ancestors(c);
        assert!(Arc::ptr_eq(&first, &second));
        let stats = index.cache_stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn capped_tables_stay_small() {
        let onto = Ontology::small();
        let index = HierarchyIndex::with_policy(onto, CachePolicy::Capped(8));
        for c in onto.concepts().take(50) {
            let _ = index.ancestors(c);
        }
        assert!(index.cache_stats().entries <= 8);

        let none = HierarchyIndex::with_policy(onto, CachePolicy::Capped(0));
        let c = onto.find_class("H1C1").unwrap();
        let _ = none.ancestors(c);
        let _ = none.ancestors(c);
        assert_eq!(none.cache_stats().entries, 0);
        assert_eq!(none.cache_stats().misses, 2);
    }

    #[test]
    fn warm_fills_tables_and_clear_empties_them() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        index.warm();
        let warmed = index.cache_stats();
        assert!(warmed.entries >= onto.concepts().count());
        index.clear();
        assert_eq!(index.cache_stats().entries, 0);
    }

    #[test]
    fn index_is_shareable() {
        fn assert_sync<T: Sync + Send>() {}
        assert_sync::<HierarchyIndex<'static, Ontology>>();
    }
}
