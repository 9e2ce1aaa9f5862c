//! Hierarchy-aware distance between descriptions.
//!
//! The distance from one description to another charges each statement the
//! cheapest way to reach a common generalization: the statement's own loss
//! to get there plus the loss the other description needs to reach the same
//! statement. A statement with no common generalization at all costs
//! [`UNREACHABLE_LOSS`]. [`metric`] adds both directions.

use std::collections::BTreeMap;

use ontoagg_ontology::HierarchyGraph;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::generalization::{description_generalizations, statement_generalizations};
use crate::hierarchy::HierarchyIndex;
use crate::statement::{Description, Statement, Subject};

/// Cost of a statement the other description cannot reach. Any score at or
/// above it is undefined.
pub const UNREACHABLE_LOSS: u32 = 10_000;

/// Symmetric distance between two descriptions of the same item.
///
/// Zero for identical descriptions, including two empty ones. A non-empty
/// description scored against an empty one is undefined.
pub fn metric<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    a: &[Statement],
    b: &[Statement],
) -> u64 {
    let forward = directed(index, a, b);
    let backward = directed(index, b, a);
    trace!(forward, backward, "metric");
    forward + backward
}

/// True when `score` signals that some statement found no common
/// generalization.
#[must_use]
pub fn is_undefined(score: u64) -> bool {
    score >= u64::from(UNREACHABLE_LOSS)
}

/// Sum over `from` of each statement's cheapest meeting point with `to`.
fn directed<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    from: &[Statement],
    to: &[Statement],
) -> u64 {
    let table = description_generalizations(index, to);
    let mut unmatched = 0usize;
    let total: u64 = from
        .iter()
        .map(|statement| {
            let best = statement_generalizations(index, statement)
                .filter_map(|g| table.get(&g.statement).map(|&loss| loss.saturating_add(g.loss)))
                .min()
                .map_or(UNREACHABLE_LOSS, |loss| loss.min(UNREACHABLE_LOSS));
            if best == UNREACHABLE_LOSS {
                unmatched += 1;
            }
            u64::from(best)
        })
        .sum();
    if unmatched > 0 {
        debug!(unmatched, of = from.len(), "statements with no common generalization");
    }
    total
}

/// Mean distance of a set of labels from the reference descriptions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Sum of the defined scores over the number of reference items, or
    /// `None` when no item had a defined score.
    pub mean: Option<f64>,
    /// Items with a defined score.
    pub defined: usize,
    /// Items whose score was undefined.
    pub undefined: usize,
}

/// Scores `labels` against `ground_truth`, item by item.
///
/// An item missing from `labels` is scored as an empty description. Labels
/// for items outside `ground_truth` are ignored. Undefined scores are left
/// out of the sum but the divisor is still the number of reference items.
pub fn evaluate<G: HierarchyGraph + ?Sized>(
    index: &HierarchyIndex<'_, G>,
    ground_truth: &BTreeMap<Subject, Description>,
    labels: &BTreeMap<Subject, Description>,
) -> Evaluation {
    let mut total = 0u64;
    let mut defined = 0usize;
    let mut undefined = 0usize;
    for (item, truth) in ground_truth {
        let label = labels.get(item).map_or(&[][..], Vec::as_slice);
        let score = metric(index, truth, label);
        if is_undefined(score) {
            undefined += 1;
        } else {
            total += score;
            defined += 1;
        }
    }
    let mean = (defined > 0).then(|| total as f64 / ground_truth.len() as f64);
    debug!(items = ground_truth.len(), defined, undefined, ?mean, "evaluated");
    Evaluation {
        mean,
        defined,
        undefined,
    }
}
