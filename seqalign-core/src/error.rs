//! Error taxonomy for the alignment engine

use crate::coords::Coordinates;
use crate::types::SequenceDesignator;
use thiserror::Error;

/// Errors that can occur while filling, tracing or interpreting an alignment matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    /// An operation needs a step that has not been performed yet
    #[error("Invalid state for {operation}: {reason}")]
    InvalidState {
        operation: &'static str,
        reason: String,
    },

    /// Symbol or cell lookup outside the consumed range of a sequence
    #[error("Index {index} out of range for {designator} (length {len})")]
    IndexOutOfRange {
        designator: SequenceDesignator,
        index: usize,
        len: usize,
    },

    /// Input or scoring configuration the engine refuses to work with
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two transitions that are not one DP move apart
    #[error("Transition {from} -> {to} is not a single alignment move")]
    InvalidStep { from: Coordinates, to: Coordinates },

    /// Fill was interrupted between anti-diagonals
    #[error("Matrix fill cancelled before anti-diagonal {diagonal}")]
    Cancelled { diagonal: usize },
}

impl AlignError {
    pub fn invalid_state<S: Into<String>>(operation: &'static str, reason: S) -> Self {
        Self::InvalidState {
            operation,
            reason: reason.into(),
        }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub fn index_out_of_range(designator: SequenceDesignator, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange {
            designator,
            index,
            len,
        }
    }
}

pub type AlignResult<T> = Result<T, AlignError>;
