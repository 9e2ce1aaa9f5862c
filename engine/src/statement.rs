//! Statements, descriptions, and generalizations.

use std::fmt;
use std::sync::Arc;

use ontoagg_ontology::{Concept, Property};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of the item a statement is about.
///
/// Opaque to every algorithm in this crate: subjects are only compared for
/// equality and carried through unchanged. Cloning is a reference-count bump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "String", into = "String")
)]
pub struct Subject(Arc<str>);

impl Subject {
    /// Creates a subject from any string.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// Returns the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Subject {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Subject {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0.as_ref().to_owned()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A triple asserting that `subject` relates to `concept` through `property`.
///
/// Ordering is by subject, then property handle, then concept handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Statement {
    /// The item described.
    pub subject: Subject,
    /// The relation.
    pub property: Property,
    /// The value, a concept of the hierarchy.
    pub concept: Concept,
}

impl Statement {
    /// Creates a statement.
    #[must_use]
    pub fn new(subject: impl Into<Subject>, property: Property, concept: Concept) -> Self {
        Self {
            subject: subject.into(),
            property,
            concept,
        }
    }

    /// The same subject with a different property and concept.
    #[must_use]
    pub fn with(&self, property: Property, concept: Concept) -> Self {
        Self {
            subject: self.subject.clone(),
            property,
            concept,
        }
    }
}

/// A set of statements one source asserts about one item.
///
/// Order carries no meaning.
pub type Description = Vec<Statement>;

/// A statement implied by another, with the information lost getting there.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Generalization {
    /// The implied statement.
    pub statement: Statement,
    /// Sum of the property-axis and concept-axis loss levels; 0 for the
    /// statement itself and its equivalents.
    pub loss: u32,
}
