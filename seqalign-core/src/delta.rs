//! Per-step view of a traceback path
//!
//! A [`TransitionDelta`] interprets one move between two adjacent transitions of a filled
//! matrix: which symbols were consumed, what the alignment column shows and how much the
//! move changed the cumulative score. Annotating it with the path-wide maximum contribution
//! yields an [`AnnotatedDelta`] carrying a normalized rendering level.

use crate::coords::{Move, Offset};
use crate::error::{AlignError, AlignResult};
use crate::matrix::AlignmentMatrix;
use crate::solution::AlignmentSolution;
use crate::transition::Transition;
use crate::types::SequenceDesignator;
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Score contribution relative to the largest contribution magnitude on a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<f32>", into = "Option<f32>")]
pub enum ContributionLevel {
    /// Value in `[-1, 1]`, rounded to two decimals
    Level(f32),
    /// The maximum contribution was zero, so there is no intensity to show
    NoData,
}

impl ContributionLevel {
    pub fn normalize(contribution: i32, max: i32) -> Self {
        if max == 0 {
            return ContributionLevel::NoData;
        }
        // Round half up to two decimals
        let scaled = (100.0 * f64::from(contribution) / f64::from(max) + 0.5).floor();
        ContributionLevel::Level((scaled / 100.0) as f32)
    }

    pub fn value(&self) -> Option<f32> {
        match self {
            ContributionLevel::Level(level) => Some(*level),
            ContributionLevel::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, ContributionLevel::NoData)
    }
}

impl From<Option<f32>> for ContributionLevel {
    fn from(value: Option<f32>) -> Self {
        value.map_or(ContributionLevel::NoData, ContributionLevel::Level)
    }
}

impl From<ContributionLevel> for Option<f32> {
    fn from(level: ContributionLevel) -> Self {
        level.value()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionDelta<'m> {
    matrix: &'m AlignmentMatrix,
    previous: &'m Transition,
    current: &'m Transition,

    // Computed
    step: Move,
    distance: Offset,
    accumulated_score: i32,
    score_contribution: i32,
    symbol_a: u8,
    symbol_b: u8,
    symbol_alignment: u8,
}

impl<'m> TransitionDelta<'m> {
    pub fn new(
        matrix: &'m AlignmentMatrix,
        previous: &'m Transition,
        current: &'m Transition,
    ) -> AlignResult<Self> {
        let distance = current.coords() - previous.coords();
        let step = distance.as_move().ok_or(AlignError::InvalidStep {
            from: previous.coords(),
            to: current.coords(),
        })?;

        // Scores always come from the matrix, never from the caller's copies
        let accumulated_score = matrix.referenced_transition(current)?.score();
        let previous_score = matrix.referenced_transition(previous)?.score();
        let score_contribution = accumulated_score
            .checked_sub(previous_score)
            .ok_or_else(|| {
                AlignError::configuration(format!(
                    "score contribution {} -> {} overflows i32",
                    previous.coords(),
                    current.coords()
                ))
            })?;

        let symbol_a = Self::compute_symbol(matrix, current, distance, SequenceDesignator::A)?;
        let symbol_b = Self::compute_symbol(matrix, current, distance, SequenceDesignator::B)?;
        let symbol_alignment = if symbol_a == symbol_b {
            symbol_a
        } else if score_contribution > 0 {
            AlignmentSolution::POSITIVE_SYMBOL
        } else {
            AlignmentSolution::NEGATIVE_SYMBOL
        };

        Ok(Self {
            matrix,
            previous,
            current,
            step,
            distance,
            accumulated_score,
            score_contribution,
            symbol_a,
            symbol_b,
            symbol_alignment,
        })
    }

    fn compute_symbol(
        matrix: &AlignmentMatrix,
        current: &Transition,
        distance: Offset,
        designator: SequenceDesignator,
    ) -> AlignResult<u8> {
        if distance.along(designator) == 1 {
            matrix.referenced_symbol(designator, current)
        } else {
            Ok(AlignmentSolution::GAP_SYMBOL)
        }
    }

    /// Second build phase: attach the level relative to `max`, the largest contribution
    /// magnitude on the path
    pub fn with_max_score_contribution(self, max: i32) -> AnnotatedDelta<'m> {
        AnnotatedDelta {
            level: ContributionLevel::normalize(self.score_contribution, max),
            delta: self,
        }
    }

    pub fn matrix(&self) -> &'m AlignmentMatrix {
        self.matrix
    }

    pub fn previous(&self) -> &'m Transition {
        self.previous
    }

    pub fn current(&self) -> &'m Transition {
        self.current
    }

    pub fn step(&self) -> Move {
        self.step
    }

    pub fn distance(&self) -> Offset {
        self.distance
    }

    /// Whether this step consumed a symbol of the designated sequence
    pub fn advanced(&self, designator: SequenceDesignator) -> bool {
        self.distance.along(designator) == 1
    }

    pub fn symbol(&self, designator: SequenceDesignator) -> u8 {
        designator.select(self.symbol_a, self.symbol_b)
    }

    pub fn symbol_a(&self) -> u8 {
        self.symbol_a
    }

    pub fn symbol_b(&self) -> u8 {
        self.symbol_b
    }

    pub fn symbol_alignment(&self) -> u8 {
        self.symbol_alignment
    }

    pub fn score_contribution(&self) -> i32 {
        self.score_contribution
    }

    /// Cumulative score at the current cell
    pub fn accumulated_score(&self) -> i32 {
        self.accumulated_score
    }

    pub fn is_identity(&self) -> bool {
        self.symbol_a == self.symbol_b
    }

    /// Zero contribution is not positive
    pub fn is_positive(&self) -> bool {
        self.score_contribution > 0
    }
}

/// A [`TransitionDelta`] with its normalized contribution level
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedDelta<'m> {
    delta: TransitionDelta<'m>,
    level: ContributionLevel,
}

impl<'m> AnnotatedDelta<'m> {
    pub fn delta(&self) -> &TransitionDelta<'m> {
        &self.delta
    }

    pub fn score_contribution_level(&self) -> ContributionLevel {
        self.level
    }
}

impl<'m> Deref for AnnotatedDelta<'m> {
    type Target = TransitionDelta<'m>;

    fn deref(&self) -> &Self::Target {
        &self.delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Coordinates;
    use crate::scoring::ScoringScheme;
    use crate::types::Sequence;

    fn filled(a: &str, b: &str, scoring: ScoringScheme) -> AlignmentMatrix {
        let mut m = AlignmentMatrix::new(
            Sequence::from_text("a", a).unwrap(),
            Sequence::from_text("b", b).unwrap(),
            scoring,
        )
        .unwrap();
        m.fill().unwrap();
        m
    }

    fn delta_between<'m>(
        m: &'m AlignmentMatrix,
        from: (usize, usize),
        to: (usize, usize),
    ) -> AlignResult<TransitionDelta<'m>> {
        let previous = m.transition_at(Coordinates::new(from.0, from.1)).unwrap();
        let current = m.transition_at(Coordinates::new(to.0, to.1)).unwrap();
        TransitionDelta::new(m, previous, current)
    }

    #[test]
    fn test_diagonal_match() {
        let m = filled("GAT", "GT", ScoringScheme::dna());
        let delta = delta_between(&m, (0, 0), (1, 1)).unwrap();
        assert_eq!(delta.step(), Move::Diagonal);
        assert_eq!(delta.symbol_a(), b'G');
        assert_eq!(delta.symbol_b(), b'G');
        assert_eq!(delta.symbol_alignment(), b'G');
        assert_eq!(delta.score_contribution(), 2);
        assert!(delta.is_identity());
        assert!(delta.is_positive());
    }

    #[test]
    fn test_vertical_gap() {
        let m = filled("GAT", "GT", ScoringScheme::dna());
        let delta = delta_between(&m, (1, 1), (2, 1)).unwrap();
        assert_eq!(delta.distance(), Offset::new(1, 0));
        assert!(delta.advanced(SequenceDesignator::A));
        assert!(!delta.advanced(SequenceDesignator::B));
        assert_eq!(delta.symbol(SequenceDesignator::A), b'A');
        assert_eq!(delta.symbol(SequenceDesignator::B), AlignmentSolution::GAP_SYMBOL);
        assert_eq!(delta.symbol_alignment(), AlignmentSolution::NEGATIVE_SYMBOL);
        assert_eq!(delta.score_contribution(), -2);
        assert!(!delta.is_identity());
    }

    #[test]
    fn test_zero_contribution_uses_negative_marker() {
        // Under edit distance scoring a match contributes exactly zero
        let m = filled("AC", "AG", ScoringScheme::edit_distance());
        let delta = delta_between(&m, (0, 0), (1, 1)).unwrap();
        assert_eq!(delta.score_contribution(), 0);
        assert!(!delta.is_positive());
        assert!(delta.is_identity());

        let mismatch = delta_between(&m, (1, 1), (2, 2)).unwrap();
        assert_eq!(mismatch.score_contribution(), -1);
        assert_eq!(mismatch.symbol_alignment(), AlignmentSolution::NEGATIVE_SYMBOL);
    }

    #[test]
    fn test_positive_mismatch_uses_positive_marker() {
        let m = filled("A", "C", ScoringScheme::new(3, 1, -5));
        let delta = delta_between(&m, (0, 0), (1, 1)).unwrap();
        assert_eq!(delta.score_contribution(), 1);
        assert_eq!(delta.symbol_alignment(), AlignmentSolution::POSITIVE_SYMBOL);
    }

    #[test]
    fn test_rejects_non_adjacent_pair() {
        let m = filled("GAT", "GT", ScoringScheme::unit());
        let err = delta_between(&m, (0, 0), (2, 1)).unwrap_err();
        assert_eq!(
            err,
            AlignError::InvalidStep {
                from: Coordinates::new(0, 0),
                to: Coordinates::new(2, 1),
            }
        );
        assert!(delta_between(&m, (1, 1), (0, 0)).is_err());
    }

    #[test]
    fn test_scores_resolve_through_matrix() {
        let m = filled("GAT", "GT", ScoringScheme::unit());
        let previous = Transition::new(Coordinates::new(1, 1), 1000, None);
        let current = Transition::new(Coordinates::new(2, 1), -1000, None);
        let delta = TransitionDelta::new(&m, &previous, &current).unwrap();
        assert_eq!(delta.score_contribution(), -1);
        assert_eq!(delta.accumulated_score(), 0);
    }

    #[test]
    fn test_levels() {
        assert_eq!(ContributionLevel::normalize(1, 1), ContributionLevel::Level(1.0));
        assert_eq!(ContributionLevel::normalize(-2, 2), ContributionLevel::Level(-1.0));
        assert_eq!(ContributionLevel::normalize(1, 3), ContributionLevel::Level(0.33));
        assert_eq!(ContributionLevel::normalize(0, 5), ContributionLevel::Level(0.0));
        assert_eq!(ContributionLevel::normalize(0, 0), ContributionLevel::NoData);
        assert!(ContributionLevel::normalize(0, 0).value().is_none());
    }

    #[test]
    fn test_annotation_keeps_delta() {
        let m = filled("GAT", "GT", ScoringScheme::dna());
        let delta = delta_between(&m, (1, 1), (2, 1)).unwrap();
        let annotated = delta.with_max_score_contribution(4);
        assert_eq!(annotated.score_contribution_level(), ContributionLevel::Level(-0.5));
        assert_eq!(annotated.symbol_a(), b'A');
    }

    #[test]
    fn test_level_serializes_as_nullable_number() {
        assert_eq!(serde_json::to_string(&ContributionLevel::Level(0.5)).unwrap(), "0.5");
        assert_eq!(serde_json::to_string(&ContributionLevel::NoData).unwrap(), "null");
    }
}
