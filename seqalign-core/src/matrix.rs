//! Alignment matrix
//!
//! Dense `(len_a + 1) x (len_b + 1)` grid of [`Transition`]s filled with the global
//! (Needleman-Wunsch style) linear-gap recurrence. When several moves reach the same
//! best score the diagonal move wins over the vertical one, and the vertical over the
//! horizontal one, so the reported traceback is reproducible.

use crate::coords::{Coordinates, Move};
use crate::error::{AlignError, AlignResult};
use crate::scoring::ScoringScheme;
use crate::transition::Transition;
use crate::types::{Sequence, SequenceDesignator};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// How the grid is traversed while filling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillStrategy {
    /// Row-major, single threaded
    #[default]
    Sequential,
    /// Cells of one anti-diagonal computed in parallel, one diagonal at a time
    AntiDiagonal,
}

#[derive(Debug, Clone)]
pub struct AlignmentMatrix {
    seq_a: Sequence,
    seq_b: Sequence,
    scoring: ScoringScheme,
    /// Row-major cells, empty until filled
    cells: Vec<Transition>,
}

impl AlignmentMatrix {
    pub fn new(seq_a: Sequence, seq_b: Sequence, scoring: ScoringScheme) -> AlignResult<Self> {
        scoring.validate();

        // Every cell index must be addressable in one allocation
        (seq_a.len() + 1)
            .checked_mul(seq_b.len() + 1)
            .ok_or_else(|| {
                AlignError::configuration(format!(
                    "matrix of {} x {} cells is too large",
                    seq_a.len() + 1,
                    seq_b.len() + 1
                ))
            })?;

        Ok(Self {
            seq_a,
            seq_b,
            scoring,
            cells: Vec::new(),
        })
    }

    pub fn sequence(&self, designator: SequenceDesignator) -> &Sequence {
        designator.select(&self.seq_a, &self.seq_b)
    }

    pub fn scoring(&self) -> &ScoringScheme {
        &self.scoring
    }

    pub fn rows(&self) -> usize {
        self.seq_a.len() + 1
    }

    pub fn cols(&self) -> usize {
        self.seq_b.len() + 1
    }

    pub fn is_filled(&self) -> bool {
        !self.cells.is_empty()
    }

    /// Coordinates of the cell where every symbol of both sequences has been consumed
    pub fn terminal_coords(&self) -> Coordinates {
        Coordinates::new(self.seq_a.len(), self.seq_b.len())
    }

    pub fn fill(&mut self) -> AlignResult<()> {
        self.fill_with(FillStrategy::Sequential)
    }

    pub fn fill_with(&mut self, strategy: FillStrategy) -> AlignResult<()> {
        log::debug!(
            "Filling {} x {} alignment matrix ({:?})",
            self.rows(),
            self.cols(),
            strategy
        );

        self.cells.clear();
        let cells = match strategy {
            FillStrategy::Sequential => self.compute_sequential()?,
            FillStrategy::AntiDiagonal => self.compute_anti_diagonal(None)?,
        };
        self.cells = cells;

        log::debug!("Matrix filled, terminal score {}", self.terminal_score()?);
        Ok(())
    }

    /// Anti-diagonal fill that checks `cancel` before every diagonal.
    ///
    /// On cancellation the matrix is left unfilled.
    pub fn fill_cancellable(&mut self, cancel: &AtomicBool) -> AlignResult<()> {
        log::debug!(
            "Filling {} x {} alignment matrix ({:?}, cancellable)",
            self.rows(),
            self.cols(),
            FillStrategy::AntiDiagonal
        );

        self.cells.clear();
        let cells = self.compute_anti_diagonal(Some(cancel))?;
        self.cells = cells;

        log::debug!("Matrix filled, terminal score {}", self.terminal_score()?);
        Ok(())
    }

    fn compute_sequential(&self) -> AlignResult<Vec<Transition>> {
        let mut cells = Vec::with_capacity(self.rows() * self.cols());
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let cell = self.best_transition(&cells, Coordinates::new(i, j))?;
                cells.push(cell);
            }
        }
        Ok(cells)
    }

    fn compute_anti_diagonal(&self, cancel: Option<&AtomicBool>) -> AlignResult<Vec<Transition>> {
        let (rows, cols) = (self.rows(), self.cols());
        let mut cells = vec![Transition::origin(); rows * cols];

        for d in 1..(rows + cols - 1) {
            if cancel.map_or(false, |flag| flag.load(Ordering::Relaxed)) {
                log::debug!("Fill cancelled at anti-diagonal {}", d);
                return Err(AlignError::Cancelled { diagonal: d });
            }

            let i_min = d.saturating_sub(cols - 1);
            let i_max = d.min(rows - 1);

            // Cells on diagonal d read only diagonals d-1 and d-2
            let computed: Vec<Transition> = {
                let grid = &cells;
                (i_min..=i_max)
                    .into_par_iter()
                    .map(|i| self.best_transition(grid, Coordinates::new(i, d - i)))
                    .collect::<AlignResult<Vec<_>>>()?
            };

            log::trace!("Anti-diagonal {}: {} cells", d, computed.len());
            for cell in computed {
                let idx = cell.coords().i * cols + cell.coords().j;
                cells[idx] = cell;
            }
        }

        Ok(cells)
    }

    /// Best-scoring arrival at `at`, reading predecessors from a row-major `grid`
    /// in which every dependency of `at` has already been computed.
    fn best_transition(&self, grid: &[Transition], at: Coordinates) -> AlignResult<Transition> {
        if at.is_origin() {
            return Ok(Transition::origin());
        }

        let cols = self.cols();
        let mut best: Option<(i32, Move)> = None;

        for step in Move::PREFERENCE {
            let Some(from) = step.predecessor_of(at) else {
                continue;
            };
            let cost = match step {
                Move::Diagonal => self.scoring.substitution(
                    self.seq_a.symbols()[at.i - 1],
                    self.seq_b.symbols()[at.j - 1],
                ),
                Move::Vertical | Move::Horizontal => self.scoring.gap(),
            };
            let score = grid[from.i * cols + from.j]
                .score()
                .checked_add(cost)
                .ok_or_else(|| {
                    AlignError::configuration(format!("cumulative score overflows i32 at {}", at))
                })?;

            // Strictly greater keeps the earlier move on ties
            if best.map_or(true, |(best_score, _)| score > best_score) {
                best = Some((score, step));
            }
        }

        let (score, step) = best.ok_or_else(|| {
            AlignError::invalid_state("fill", format!("no predecessor available for {}", at))
        })?;
        Ok(Transition::new(at, score, Some(step)))
    }

    fn ensure_filled(&self, operation: &'static str) -> AlignResult<()> {
        if self.is_filled() {
            Ok(())
        } else {
            Err(AlignError::invalid_state(operation, "matrix has not been filled"))
        }
    }

    pub fn transition_at(&self, coords: Coordinates) -> AlignResult<&Transition> {
        self.ensure_filled("transition lookup")?;
        if coords.i >= self.rows() {
            return Err(AlignError::index_out_of_range(SequenceDesignator::A, coords.i, self.seq_a.len()));
        }
        if coords.j >= self.cols() {
            return Err(AlignError::index_out_of_range(SequenceDesignator::B, coords.j, self.seq_b.len()));
        }
        Ok(&self.cells[coords.i * self.cols() + coords.j])
    }

    /// The matrix's own transition at the coordinates of `transition`, which may be a copy
    pub fn referenced_transition(&self, transition: &Transition) -> AlignResult<&Transition> {
        self.transition_at(transition.coords())
    }

    /// Symbol of the designated sequence consumed on arrival at `transition`
    pub fn referenced_symbol(
        &self,
        designator: SequenceDesignator,
        transition: &Transition,
    ) -> AlignResult<u8> {
        let sequence = self.sequence(designator);
        let index = transition.index(designator);
        sequence
            .symbol_at(index)
            .ok_or_else(|| AlignError::index_out_of_range(designator, index, sequence.len()))
    }

    pub fn terminal(&self) -> AlignResult<&Transition> {
        self.transition_at(self.terminal_coords())
    }

    pub fn terminal_score(&self) -> AlignResult<i32> {
        self.terminal().map(Transition::score)
    }

    /// Transitions from the terminal cell back to the origin, following predecessor links
    pub fn traceback(&self) -> AlignResult<Vec<&Transition>> {
        self.ensure_filled("traceback")?;

        let mut path = Vec::with_capacity(self.rows() + self.cols());
        let mut current = self.terminal()?;
        path.push(current);
        while let Some(previous) = current.predecessor() {
            current = self.transition_at(previous)?;
            path.push(current);
        }
        Ok(path)
    }

    /// Traceback in origin-to-terminal order
    pub fn best_path(&self) -> AlignResult<Vec<&Transition>> {
        let mut path = self.traceback()?;
        path.reverse();
        Ok(path)
    }
}
