//! Ontology-aware aggregation of crowd-sourced statements.
//!
//! Several sources describe the same item with statements
//! `(item, property, concept)` whose values are concepts of a hierarchy. This
//! crate fuses them into one consensus description and scores descriptions
//! against each other, using the hierarchy to credit partial agreement: two
//! sources that name sibling concepts still agree on the parent.
//!
//! # Pipeline
//!
//! ```text
//! HierarchyGraph ──► HierarchyIndex (memoized, shared)
//!                        │
//!        ┌───────────────┼────────────────────┐
//!        ▼               ▼                    ▼
//!   generalize_     statement_          description_
//!   statement       generalizations     generalizations
//!        │               │                    │
//!        ▼               ▼                    ▼
//!   aggregate ◄── CombinationRule        metric / evaluate
//!        │
//!        ▼
//!    Consensus
//! ```
//!
//! # Example
//!
//! ```
//! use ontoagg_engine::{aggregate, metric, CombinationRule, HierarchyIndex, Statement};
//! use ontoagg_ontology::Ontology;
//!
//! let onto = Ontology::small();
//! let index = HierarchyIndex::new(onto);
//! let pt = onto.find_property("hasPrimaryTopic").unwrap();
//! let c = |name| onto.find_class(name).unwrap();
//!
//! let sources = vec![
//!     (1.0, vec![Statement::new("doc", pt, c("H1C11"))]),
//!     (1.0, vec![Statement::new("doc", pt, c("H1C12"))]),
//! ];
//! let consensus = aggregate(&index, &sources, CombinationRule::Voting, 2.0);
//! assert_eq!(
//!     consensus.into_description(),
//!     vec![Statement::new("doc", pt, c("H1C1"))]
//! );
//!
//! assert_eq!(metric(&index, &sources[0].1, &sources[1].1), 4);
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod aggregation;
pub mod belief;
pub mod error;
pub mod generalization;
pub mod hierarchy;
pub mod labeler;
pub mod metric;
pub mod statement;

pub use aggregation::{aggregate, fuse, Consensus, ConsensusEntry};
pub use belief::{Belief, CombinationRule};
pub use error::AggregationError;
pub use generalization::{
    concept_losses, description_generalizations, generalize_statement, propagate,
    property_losses, statement_generalizations, Propagation, StatementGeneralizations,
    StatementPropagation,
};
pub use hierarchy::{CachePolicy, CacheStats, HierarchyIndex};
pub use labeler::{AggregateLabeler, Labeler};
pub use metric::{evaluate, is_undefined, metric, Evaluation, UNREACHABLE_LOSS};
pub use statement::{Description, Generalization, Statement, Subject};
