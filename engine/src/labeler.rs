//! Labelers and their aggregation.
//!
//! A [`Labeler`] is anything that describes an item, such as a crowd worker
//! or a simulated one. [`AggregateLabeler`] asks several labelers about the
//! same item and fuses their answers with [`aggregate`].

use ontoagg_ontology::HierarchyGraph;
use tracing::debug;

use crate::aggregation::{aggregate, Consensus};
use crate::belief::{Belief, CombinationRule};
use crate::error::AggregationError;
use crate::hierarchy::HierarchyIndex;
use crate::statement::{Description, Statement, Subject};

/// A source of descriptions.
pub trait Labeler {
    /// Describes `item`. `truth` is the item's reference description, for
    /// labelers that simulate noise around it; real labelers ignore it.
    fn label_object(&self, item: &Subject, truth: &[Statement]) -> Description;
}

impl<F> Labeler for F
where
    F: Fn(&Subject, &[Statement]) -> Description,
{
    fn label_object(&self, item: &Subject, truth: &[Statement]) -> Description {
        self(item, truth)
    }
}

/// Several weighted labelers fused under one combination rule.
#[derive(Debug, Clone)]
pub struct AggregateLabeler<L> {
    labelers: Vec<(L, Belief)>,
    rule: CombinationRule,
    threshold: Belief,
}

impl<L: Labeler> AggregateLabeler<L> {
    /// Fuses `labelers`, each with its own belief, under `rule`.
    ///
    /// # Errors
    ///
    /// [`AggregationError::NoLabelers`] for an empty list, any error of
    /// [`CombinationRule::validate_belief`] for a labeler's belief, and
    /// [`AggregationError::NonFiniteThreshold`] for a NaN or infinite
    /// threshold.
    pub fn new(
        labelers: Vec<(L, Belief)>,
        rule: CombinationRule,
        threshold: Belief,
    ) -> Result<Self, AggregationError> {
        if labelers.is_empty() {
            return Err(AggregationError::NoLabelers);
        }
        for &(_, belief) in &labelers {
            rule.validate_belief(belief)?;
        }
        if !threshold.is_finite() {
            return Err(AggregationError::NonFiniteThreshold(threshold));
        }
        Ok(Self {
            labelers,
            rule,
            threshold,
        })
    }

    /// Majority voting: every labeler counts once, and a statement needs
    /// `votes_threshold` net votes.
    ///
    /// # Errors
    ///
    /// As [`AggregateLabeler::new`].
    pub fn voting(labelers: Vec<L>, votes_threshold: Belief) -> Result<Self, AggregationError> {
        Self::new(
            labelers.into_iter().map(|l| (l, 1.0)).collect(),
            CombinationRule::Voting,
            votes_threshold,
        )
    }

    /// Shortliffe–Buchanan certainty factors: every labeler carries a
    /// belief in `[-1, 1]`, and a statement needs `belief_threshold`.
    ///
    /// # Errors
    ///
    /// As [`AggregateLabeler::new`]; beliefs outside `[-1, 1]` are rejected.
    pub fn shortliffe_buchanan(
        labelers: Vec<(L, Belief)>,
        belief_threshold: Belief,
    ) -> Result<Self, AggregationError> {
        Self::new(labelers, CombinationRule::ShortliffeBuchanan, belief_threshold)
    }

    /// The combination rule.
    #[must_use]
    pub fn rule(&self) -> CombinationRule {
        self.rule
    }

    /// The support threshold.
    #[must_use]
    pub fn threshold(&self) -> Belief {
        self.threshold
    }

    /// Number of labelers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labelers.len()
    }

    /// True when no labeler is held. [`AggregateLabeler::new`] rejects an
    /// empty list, so a constructed value is never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labelers.is_empty()
    }

    /// Asks every labeler about `item` and fuses the answers.
    pub fn consensus<G: HierarchyGraph + ?Sized>(
        &self,
        index: &HierarchyIndex<'_, G>,
        item: &Subject,
        truth: &[Statement],
    ) -> Consensus {
        let sources: Vec<(Belief, Description)> = self
            .labelers
            .iter()
            .map(|(labeler, belief)| (*belief, labeler.label_object(item, truth)))
            .collect();
        let consensus = aggregate(index, &sources, self.rule, self.threshold);
        debug!(item = %item, labelers = sources.len(), kept = consensus.len(), "labeled");
        consensus
    }

    /// Asks every labeler about `item` and returns the fused description.
    pub fn label_object<G: HierarchyGraph + ?Sized>(
        &self,
        index: &HierarchyIndex<'_, G>,
        item: &Subject,
        truth: &[Statement],
    ) -> Description {
        self.consensus(index, item, truth).into_description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontoagg_ontology::{Concept, Ontology, Property};

    type Boxed = Box<dyn Fn(&Subject, &[Statement]) -> Description>;

    fn says(names: &'static [&'static str]) -> Boxed {
        Box::new(move |item: &Subject, _: &[Statement]| -> Description {
            let onto = Ontology::small();
            let pt = onto.find_property("hasPrimaryTopic").unwrap();
            names
                .iter()
                .map(|n| Statement::new(item.clone(), pt, onto.find_class(n).unwrap()))
                .collect()
        })
    }

    fn echo() -> Boxed {
        Box::new(|_: &Subject, truth: &[Statement]| truth.to_vec())
    }

    #[test]
    fn rejects_empty_and_invalid_configurations() {
        assert!(matches!(
            AggregateLabeler::<Boxed>::voting(Vec::new(), 1.0),
            Err(AggregationError::NoLabelers)
        ));
        assert!(matches!(
            AggregateLabeler::shortliffe_buchanan(vec![(echo(), 1.2)], 0.5),
            Err(AggregationError::BeliefOutOfRange { .. })
        ));
        assert!(matches!(
            AggregateLabeler::voting(vec![echo()], f64::NAN),
            Err(AggregationError::NonFiniteThreshold(_))
        ));
    }

    #[test]
    fn voting_labeler_agrees_on_parent() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        let agg = AggregateLabeler::voting(vec![says(&["H1C11"]), says(&["H1C12"])], 2.0).unwrap();
        assert_eq!(agg.len(), 2);
        assert!(!agg.is_empty());
        let out = agg.label_object(&index, &Subject::new("doc"), &[]);
        let pt = onto.find_property("hasPrimaryTopic").unwrap();
        assert_eq!(
            out,
            vec![Statement::new("doc", pt, onto.find_class("H1C1").unwrap())]
        );
    }

    #[test]
    fn echoing_labelers_reproduce_the_truth() {
        let onto = Ontology::small();
        let index = HierarchyIndex::new(onto);
        let pt = onto.find_property("hasPrimaryTopic").unwrap();
        let truth = vec![Statement::new("doc", pt, onto.find_class("H2C213").unwrap())];
        let agg =
            AggregateLabeler::shortliffe_buchanan(vec![(echo(), 0.6), (echo(), 0.6)], 0.8).unwrap();
        let consensus = agg.consensus(&index, &Subject::new("doc"), &truth);
        assert_eq!(consensus.statements().cloned().collect::<Vec<_>>(), truth);
        let b = consensus.belief(&truth[0]).unwrap();
        assert!((b - 0.84).abs() < 1e-12);
    }

    #[test]
    fn closures_are_labelers() {
        let l = |item: &Subject, _: &[Statement]| -> Description {
            vec![Statement::new(item.clone(), Property::new(3), Concept::TOP)]
        };
        assert_eq!(l.label_object(&Subject::new("x"), &[]).len(), 1);
    }
}
