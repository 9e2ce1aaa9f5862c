//! Belief combination rules.
//!
//! A rule answers three questions about beliefs attached to statements:
//!
//! - how to merge two beliefs one source reaches for the same statement along
//!   different generalization paths ([`CombinationRule::multipath_combine`]),
//! - what belief a source holds in a statement its assertions rule out
//!   ([`CombinationRule::negative`]),
//! - how to fuse the beliefs of two different sources
//!   ([`CombinationRule::combine`]).
//!
//! Rules are a closed set, so they are an enum rather than a trait object.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::AggregationError;

/// A signed degree of support. Positive supports a statement, negative
/// opposes it.
pub type Belief = f64;

/// How beliefs are merged within and across sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum CombinationRule {
    /// Additive vote counting. Beliefs are unbounded weights.
    Voting,
    /// Shortliffe–Buchanan certainty factors. Beliefs stay in `[-1, 1]`.
    ShortliffeBuchanan,
}

impl CombinationRule {
    /// Every rule, in declaration order.
    pub const ALL: [CombinationRule; 2] = [Self::Voting, Self::ShortliffeBuchanan];

    /// Returns the short name accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Voting => "voting",
            Self::ShortliffeBuchanan => "sb",
        }
    }

    /// True when beliefs must lie in `[-1, 1]`.
    #[must_use]
    pub const fn is_bounded(self) -> bool {
        matches!(self, Self::ShortliffeBuchanan)
    }

    /// Merges two beliefs one source holds in the same statement.
    ///
    /// Both rules keep the stronger.
    #[must_use]
    pub fn multipath_combine(self, a: Belief, b: Belief) -> Belief {
        a.max(b)
    }

    /// The belief a source holds in a statement its assertion of belief `a`
    /// excludes.
    #[must_use]
    pub fn negative(self, a: Belief) -> Belief {
        -a
    }

    /// Fuses beliefs from two different sources.
    ///
    /// Voting adds. Shortliffe–Buchanan reinforces two supporting beliefs
    /// toward `1`, adds `b(1 + b)` to an opposing `a` when `b` opposes too, and
    /// cancels beliefs of opposite sign; two fully opposed certainties (`1`
    /// and `-1`) cancel to `0`.
    #[must_use]
    pub fn combine(self, a: Belief, b: Belief) -> Belief {
        match self {
            Self::Voting => a + b,
            Self::ShortliffeBuchanan => {
                if a <= 0.0 && b <= 0.0 {
                    a + b * (1.0 + b)
                } else if a >= 0.0 && b >= 0.0 {
                    a + b * (1.0 - a)
                } else {
                    let denominator = 1.0 - a.abs().min(b.abs());
                    if denominator == 0.0 {
                        0.0
                    } else {
                        (a + b) / denominator
                    }
                }
            }
        }
    }

    /// Left-folds [`combine`](Self::combine) over beliefs in the order given.
    ///
    /// Returns `None` for an empty sequence.
    pub fn fold<I>(self, beliefs: I) -> Option<Belief>
    where
        I: IntoIterator<Item = Belief>,
    {
        beliefs.into_iter().reduce(|acc, b| self.combine(acc, b))
    }

    /// Checks that `belief` is usable as a source weight under this rule.
    ///
    /// # Errors
    ///
    /// [`AggregationError::NonFiniteBelief`] for NaN or infinities, and
    /// [`AggregationError::BeliefOutOfRange`] when a bounded rule gets a
    /// belief outside `[-1, 1]`.
    pub fn validate_belief(self, belief: Belief) -> Result<(), AggregationError> {
        if !belief.is_finite() {
            return Err(AggregationError::NonFiniteBelief(belief));
        }
        if self.is_bounded() && !(-1.0..=1.0).contains(&belief) {
            return Err(AggregationError::BeliefOutOfRange { belief, rule: self });
        }
        Ok(())
    }
}

impl fmt::Display for CombinationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CombinationRule {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "voting" | "vote" => Ok(Self::Voting),
            "sb" | "shortliffe-buchanan" | "shortliffe_buchanan" => Ok(Self::ShortliffeBuchanan),
            _ => Err(AggregationError::UnknownRule(s.to_owned())),
        }
    }
}
