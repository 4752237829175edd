//! SeqAlign Core Library
//!
//! Global pairwise alignment of two symbol sequences by dynamic programming, and the
//! traceback interpretation a renderer consumes: per-step symbols, gap markers and
//! normalized score contributions.
//!
//! ```
//! use seqalign_core::{AlignmentMatrix, AlignmentSolution, ScoringScheme, Sequence};
//!
//! let mut matrix = AlignmentMatrix::new(
//!     Sequence::from_text("a", "ACGT").unwrap(),
//!     Sequence::from_text("b", "AGT").unwrap(),
//!     ScoringScheme::unit(),
//! )
//! .unwrap();
//! matrix.fill().unwrap();
//!
//! let solution = AlignmentSolution::new(&matrix).unwrap();
//! assert_eq!(solution.line_b(), "A-GT");
//! assert_eq!(solution.score(), 2);
//! ```

pub mod coords;
pub mod delta;
pub mod error;
pub mod matrix;
pub mod scoring;
pub mod solution;
pub mod transition;
pub mod types;

// Re-export commonly used types
pub use coords::{Coordinates, Move, Offset};
pub use delta::{AnnotatedDelta, ContributionLevel, TransitionDelta};
pub use error::{AlignError, AlignResult};
pub use matrix::{AlignmentMatrix, FillStrategy};
pub use scoring::ScoringScheme;
pub use solution::{AlignmentReport, AlignmentSolution, TraceSegment};
pub use transition::Transition;
pub use types::{Sequence, SequenceDesignator};

/// Version information for the SeqAlign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
