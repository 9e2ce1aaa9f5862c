//! Errors raised while configuring an aggregation.

use crate::belief::CombinationRule;

/// A rejected aggregation setting.
///
/// The algorithms themselves are total; errors only arise when a caller
/// hands in beliefs, thresholds, or rule names that cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    /// An aggregate labeler was built from an empty labeler list.
    #[error("an aggregate labeler needs at least one labeler")]
    NoLabelers,

    /// A belief is NaN or infinite.
    #[error("belief {0} is not a finite number")]
    NonFiniteBelief(f64),

    /// A belief lies outside the domain the rule accepts.
    #[error("belief {belief} is outside [-1, 1], the domain of the {rule} rule")]
    BeliefOutOfRange {
        /// The rejected belief.
        belief: f64,
        /// The rule whose domain it violates.
        rule: CombinationRule,
    },

    /// A support threshold is NaN or infinite.
    #[error("support threshold {0} is not a finite number")]
    NonFiniteThreshold(f64),

    /// A rule name that names no combination rule.
    #[error("unknown combination rule `{0}` (expected `voting` or `sb`)")]
    UnknownRule(String),
}
