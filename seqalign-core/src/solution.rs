//! Assembled alignment
//!
//! [`AlignmentSolution`] turns one complete traceback path into the three parallel symbol
//! lines a renderer prints, annotates every step with its contribution level, and exposes
//! the per-step segments a graphical view draws over the matrix extent.

use crate::coords::Coordinates;
use crate::delta::{AnnotatedDelta, ContributionLevel, TransitionDelta};
use crate::error::{AlignError, AlignResult};
use crate::matrix::AlignmentMatrix;
use crate::scoring::ScoringScheme;
use crate::types::SequenceDesignator;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct AlignmentSolution<'m> {
    matrix: &'m AlignmentMatrix,
    deltas: Vec<AnnotatedDelta<'m>>,
    line_a: String,
    line_alignment: String,
    line_b: String,
    score: i32,
    max_score_contribution: i32,
}

impl<'m> AlignmentSolution<'m> {
    /// Marks a position where a sequence consumed no symbol
    pub const GAP_SYMBOL: u8 = b'-';
    /// Non-identity column with a positive score contribution
    pub const POSITIVE_SYMBOL: u8 = b'+';
    /// Non-identity column with a zero or negative score contribution
    pub const NEGATIVE_SYMBOL: u8 = b'.';

    pub const RESERVED_SYMBOLS: [u8; 3] =
        [Self::GAP_SYMBOL, Self::POSITIVE_SYMBOL, Self::NEGATIVE_SYMBOL];

    /// Trace the best path of a filled matrix and assemble it
    pub fn new(matrix: &'m AlignmentMatrix) -> AlignResult<Self> {
        Self::check_alphabets(matrix)?;

        let path = matrix.best_path()?;
        let deltas = path
            .windows(2)
            .map(|pair| TransitionDelta::new(matrix, pair[0], pair[1]))
            .collect::<AlignResult<Vec<_>>>()?;

        Self::from_deltas(matrix, deltas)
    }

    /// Assemble an origin-to-terminal sequence of deltas taken from `matrix`
    pub fn from_deltas(
        matrix: &'m AlignmentMatrix,
        deltas: Vec<TransitionDelta<'m>>,
    ) -> AlignResult<Self> {
        Self::check_alphabets(matrix)?;
        Self::check_path(matrix, &deltas)?;

        let mut max_score_contribution = 0i32;
        for delta in &deltas {
            let magnitude = delta.score_contribution().checked_abs().ok_or_else(|| {
                AlignError::configuration("score contribution magnitude overflows i32")
            })?;
            max_score_contribution = max_score_contribution.max(magnitude);
        }

        let mut line_a = String::with_capacity(deltas.len());
        let mut line_alignment = String::with_capacity(deltas.len());
        let mut line_b = String::with_capacity(deltas.len());
        let deltas: Vec<AnnotatedDelta<'m>> = deltas
            .into_iter()
            .map(|delta| {
                line_a.push(char::from(delta.symbol_a()));
                line_alignment.push(char::from(delta.symbol_alignment()));
                line_b.push(char::from(delta.symbol_b()));
                delta.with_max_score_contribution(max_score_contribution)
            })
            .collect();

        let score = matrix.terminal_score()?;
        log::debug!(
            "Assembled alignment of {} columns, score {}, max contribution {}",
            deltas.len(),
            score,
            max_score_contribution
        );

        Ok(Self {
            matrix,
            deltas,
            line_a,
            line_alignment,
            line_b,
            score,
            max_score_contribution,
        })
    }

    fn check_alphabets(matrix: &AlignmentMatrix) -> AlignResult<()> {
        for designator in SequenceDesignator::ALL {
            let sequence = matrix.sequence(designator);
            if let Some(&reserved) = Self::RESERVED_SYMBOLS
                .iter()
                .find(|&&symbol| sequence.contains(symbol))
            {
                return Err(AlignError::configuration(format!(
                    "{} ('{}') uses reserved alignment symbol '{}'",
                    designator,
                    sequence.name,
                    char::from(reserved)
                )));
            }
        }
        Ok(())
    }

    fn check_path(matrix: &AlignmentMatrix, deltas: &[TransitionDelta<'m>]) -> AlignResult<()> {
        let mut expected = Coordinates::ORIGIN;
        for delta in deltas {
            if !std::ptr::eq(delta.matrix(), matrix) {
                return Err(AlignError::invalid_state(
                    "solution assembly",
                    format!(
                        "step {} -> {} was taken from another matrix",
                        delta.previous().coords(),
                        delta.current().coords()
                    ),
                ));
            }
            if delta.previous().coords() != expected {
                return Err(AlignError::invalid_state(
                    "solution assembly",
                    format!(
                        "path is broken: expected a step from {}, found {}",
                        expected,
                        delta.previous().coords()
                    ),
                ));
            }
            expected = delta.current().coords();
        }

        if expected != matrix.terminal_coords() {
            return Err(AlignError::invalid_state(
                "solution assembly",
                format!(
                    "path ends at {} instead of {}",
                    expected,
                    matrix.terminal_coords()
                ),
            ));
        }
        Ok(())
    }

    pub fn matrix(&self) -> &'m AlignmentMatrix {
        self.matrix
    }

    pub fn deltas(&self) -> &[AnnotatedDelta<'m>] {
        &self.deltas
    }

    pub fn line_a(&self) -> &str {
        &self.line_a
    }

    pub fn line_alignment(&self) -> &str {
        &self.line_alignment
    }

    pub fn line_b(&self) -> &str {
        &self.line_b
    }

    pub fn line(&self, designator: SequenceDesignator) -> &str {
        designator.select(&self.line_a, &self.line_b)
    }

    /// Score of the terminal transition
    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn max_score_contribution(&self) -> i32 {
        self.max_score_contribution
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    pub fn levels(&self) -> Vec<ContributionLevel> {
        self.deltas
            .iter()
            .map(AnnotatedDelta::score_contribution_level)
            .collect()
    }

    pub fn identities(&self) -> usize {
        self.deltas.iter().filter(|d| d.is_identity()).count()
    }

    pub fn mismatches(&self) -> usize {
        self.deltas
            .iter()
            .filter(|d| !d.step().is_gap() && !d.is_identity())
            .count()
    }

    pub fn gaps(&self) -> usize {
        self.deltas.iter().filter(|d| d.step().is_gap()).count()
    }

    /// Fraction of columns that are identities, 0 for an empty alignment
    pub fn identity_fraction(&self) -> f64 {
        if self.deltas.is_empty() {
            return 0.0;
        }
        self.identities() as f64 / self.deltas.len() as f64
    }

    /// Largest coordinates a path can reach, i.e. the drawing extent of the matrix
    pub fn extent(&self) -> Coordinates {
        self.matrix.terminal_coords()
    }

    pub fn segments(&self) -> Vec<TraceSegment> {
        self.deltas
            .iter()
            .map(|d| TraceSegment {
                from: d.previous().coords(),
                to: d.current().coords(),
                level: d.score_contribution_level(),
                identity: d.is_identity(),
            })
            .collect()
    }

    pub fn report(&self) -> AlignmentReport {
        AlignmentReport {
            name_a: self.matrix.sequence(SequenceDesignator::A).name.clone(),
            name_b: self.matrix.sequence(SequenceDesignator::B).name.clone(),
            scoring: *self.matrix.scoring(),
            line_a: self.line_a.clone(),
            line_alignment: self.line_alignment.clone(),
            line_b: self.line_b.clone(),
            score: self.score,
            length: self.len(),
            identities: self.identities(),
            mismatches: self.mismatches(),
            gaps: self.gaps(),
            identity_percent: self.identity_fraction() * 100.0,
            extent: self.extent(),
            levels: self.levels(),
            segments: self.segments(),
        }
    }
}

impl fmt::Display for AlignmentSolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.line_a)?;
        writeln!(f, "{}", self.line_alignment)?;
        write!(f, "{}", self.line_b)
    }
}

/// One traceback step as a line segment between two matrix cells
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSegment {
    pub from: Coordinates,
    pub to: Coordinates,
    pub level: ContributionLevel,
    pub identity: bool,
}

/// Owned, serializable summary of a solution for renderers and reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentReport {
    pub name_a: String,
    pub name_b: String,
    pub scoring: ScoringScheme,
    pub line_a: String,
    pub line_alignment: String,
    pub line_b: String,
    pub score: i32,
    pub length: usize,
    pub identities: usize,
    pub mismatches: usize,
    pub gaps: usize,
    pub identity_percent: f64,
    pub extent: Coordinates,
    pub levels: Vec<ContributionLevel>,
    pub segments: Vec<TraceSegment>,
}

impl AlignmentReport {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
