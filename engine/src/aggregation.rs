//! Fusing several sources' descriptions of one item into a consensus.
//!
//! [`aggregate`] runs four phases:
//!
//! 1. **Propagation.** Each source's statements are expanded through
//!    [`generalize_statement`]: implied pairs get the source's belief,
//!    excluded pairs its negation. Beliefs a source reaches along several
//!    paths are merged with the rule's multipath combination.
//! 2. **Fusion.** Per statement, the sources' beliefs are folded with the
//!    rule's combination, in source order.
//! 3. **Threshold.** Statements whose fused belief falls below the support
//!    threshold are dropped.
//! 4. **Redundancy elimination.** A survivor another survivor strictly
//!    implies is dropped. Survivors that imply each other at no loss are
//!    equivalent; only the smallest of them is kept.
//!
//! Phases 1 and 2 are also available on their own as [`fuse`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use ontoagg_ontology::HierarchyGraph;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::belief::{Belief, CombinationRule};
use crate::generalization::{generalize_statement, statement_generalizations};
use crate::hierarchy::HierarchyIndex;
use crate::statement::{Description, Statement};

/// The outcome of an aggregation: non-redundant statements with their fused
/// belief, in statement order.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Vec<ConsensusEntry>", into = "Vec<ConsensusEntry>")
)]
pub struct Consensus {
    beliefs: BTreeMap<Statement, Belief>,
}

/// One statement of a [`Consensus`] with its belief.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsensusEntry {
    /// The statement.
    pub statement: Statement,
    /// Its fused belief.
    pub belief: Belief,
}

impl Consensus {
    /// The statements, in order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> + '_ {
        self.beliefs.keys()
    }

    /// Statements paired with their beliefs, in order.
    pub fn iter(&self) -> impl Iterator<Item = (&Statement, Belief)> + '_ {
        self.beliefs.iter().map(|(s, &b)| (s, b))
    }

    /// The fused belief in `statement`, if it survived.
    #[must_use]
    pub fn belief(&self, statement: &Statement) -> Option<Belief> {
        self.beliefs.get(statement).copied()
    }

    /// True if `statement` survived.
    #[must_use]
    pub fn contains(&self, statement: &Statement) -> bool {
        self.beliefs.contains_key(statement)
    }

    /// Number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.beliefs.len()
    }

    /// True when no statement survived.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.beliefs.is_empty()
    }

    /// Drops the beliefs.
    #[must_use]
    pub fn into_description(self) -> Description {
        self.beliefs.into_keys().collect()
    }
}

impl From<Vec<ConsensusEntry>> for Consensus {
    fn from(entries: Vec<ConsensusEntry>) -> Self {
        Self {
            beliefs: entries.into_iter().map(|e| (e.statement, e.belief)).collect(),
        }
    }
}

impl From<Consensus> for Vec<ConsensusEntry> {
    fn from(consensus: Consensus) -> Self {
        consensus
            .beliefs
            .into_iter()
            .map(|(statement, belief)| ConsensusEntry { statement, belief })
            .collect()
    }
}

/// Fuses weighted descriptions of one item into a non-redundant consensus.
///
/// `sources` pairs each source's belief with its description; fusion order
/// is the order given. Statements whose fused belief is at least `threshold`
/// survive. Empty input yields an empty consensus.
///
/// Raising `threshold` shrinks the supported set, but not necessarily the
/// consensus: dropping a specific statement can expose several incomparable
/// generalizations it used to cover.
pub fn aggregate<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    sources: &[(Belief, Description)],
    rule: CombinationRule,
    threshold: Belief,
) -> Consensus {
    let fused = fuse(index, sources, rule);
    let candidates = fused.len();
    let survivors: BTreeMap<Statement, Belief> = fused
        .into_iter()
        .filter(|&(_, belief)| belief >= threshold)
        .collect();
    let supported = survivors.len();

    let beliefs = eliminate_redundant(index, survivors);
    debug!(
        sources = sources.len(),
        rule = rule.as_str(),
        threshold,
        candidates,
        supported,
        kept = beliefs.len(),
        "aggregated"
    );
    Consensus { beliefs }
}

/// Propagates every source's statements and fuses the resulting beliefs,
/// before any threshold or redundancy elimination.
///
/// Every statement any source implies or excludes is present.
pub fn fuse<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    sources: &[(Belief, Description)],
    rule: CombinationRule,
) -> BTreeMap<Statement, Belief> {
    // Per statement, one belief per source that reached it, in source order.
    let mut votes: HashMap<Statement, Vec<Belief>> = HashMap::new();
    for (belief, description) in sources {
        let mut reached: HashMap<Statement, Belief> = HashMap::new();
        let mut record = |statement: Statement, b: Belief| {
            reached
                .entry(statement)
                .and_modify(|held| *held = rule.multipath_combine(*held, b))
                .or_insert(b);
        };
        for statement in description {
            let implied = generalize_statement(index, statement.property, statement.concept);
            for (p, c) in implied.positive {
                record(statement.with(p, c), *belief);
            }
            for (p, c) in implied.negative {
                record(statement.with(p, c), rule.negative(*belief));
            }
        }
        for (statement, b) in reached {
            votes.entry(statement).or_default().push(b);
        }
    }
    votes
        .into_iter()
        .filter_map(|(statement, beliefs)| Some((statement, rule.fold(beliefs)?)))
        .collect()
}

/// Keeps the most specific survivors, one per equivalence class.
fn eliminate_redundant<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    survivors: BTreeMap<Statement, Belief>,
) -> BTreeMap<Statement, Belief> {
    // For each survivor, the other survivors it implies.
    let implies: BTreeMap<&Statement, BTreeSet<&Statement>> = survivors
        .keys()
        .map(|s| {
            let reached = statement_generalizations(index, s)
                .filter_map(|g| survivors.get_key_value(&g.statement).map(|(k, _)| k))
                .filter(|&k| k != s)
                .collect();
            (s, reached)
        })
        .collect();
    let reaches =
        |a: &Statement, b: &Statement| implies.get(a).is_some_and(|set| set.contains(b));

    let redundant = |s: &Statement| {
        implies.iter().any(|(&other, reached)| {
            reached.contains(s) && (!reaches(s, other) || other < s)
        })
    };

    let mut kept: BTreeMap<Statement, Belief> = BTreeMap::new();
    for (s, &b) in &survivors {
        if redundant(s) {
            continue;
        }
        // An equivalence class carries the strongest belief among its members.
        let belief = implies
            .get(s)
            .into_iter()
            .flatten()
            .filter(|&&e| reaches(e, s))
            .filter_map(|&e| survivors.get(e))
            .fold(b, |acc, &e| acc.max(e));
        kept.insert(s.clone(), belief);
    }
    kept
}
