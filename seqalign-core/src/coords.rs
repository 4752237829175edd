use crate::types::SequenceDesignator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Position of a cell in the alignment matrix.
///
/// `i` counts symbols of sequence A consumed, `j` symbols of sequence B; `(0, 0)` is the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub i: usize,
    pub j: usize,
}

impl Coordinates {
    pub const ORIGIN: Coordinates = Coordinates { i: 0, j: 0 };

    pub fn new(i: usize, j: usize) -> Self {
        Self { i, j }
    }

    /// Index along the axis of the given sequence
    pub fn index(&self, designator: SequenceDesignator) -> usize {
        designator.select(self.i, self.j)
    }

    /// Anti-diagonal this cell lies on
    pub fn diagonal(&self) -> usize {
        self.i + self.j
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

impl Sub for Coordinates {
    type Output = Offset;

    fn sub(self, rhs: Coordinates) -> Offset {
        Offset {
            di: self.i as isize - rhs.i as isize,
            dj: self.j as isize - rhs.j as isize,
        }
    }
}

/// Componentwise difference of two coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Offset {
    pub di: isize,
    pub dj: isize,
}

impl Offset {
    pub fn new(di: isize, dj: isize) -> Self {
        Self { di, dj }
    }

    pub fn along(&self, designator: SequenceDesignator) -> isize {
        designator.select(self.di, self.dj)
    }

    /// The DP move this offset corresponds to, if any
    pub fn as_move(&self) -> Option<Move> {
        match (self.di, self.dj) {
            (1, 1) => Some(Move::Diagonal),
            (1, 0) => Some(Move::Vertical),
            (0, 1) => Some(Move::Horizontal),
            _ => None,
        }
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.di, self.dj)
    }
}

/// The three moves of the recurrence, listed in tie-break preference order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Consumes one symbol of each sequence (match or mismatch)
    Diagonal,
    /// Consumes a symbol of A against a gap in B
    Vertical,
    /// Consumes a symbol of B against a gap in A
    Horizontal,
}

impl Move {
    pub const PREFERENCE: [Move; 3] = [Move::Diagonal, Move::Vertical, Move::Horizontal];

    pub fn offset(self) -> Offset {
        match self {
            Move::Diagonal => Offset::new(1, 1),
            Move::Vertical => Offset::new(1, 0),
            Move::Horizontal => Offset::new(0, 1),
        }
    }

    /// Cell this move would have come from when arriving at `to`
    pub fn predecessor_of(self, to: Coordinates) -> Option<Coordinates> {
        match self {
            Move::Diagonal if to.i > 0 && to.j > 0 => Some(Coordinates::new(to.i - 1, to.j - 1)),
            Move::Vertical if to.i > 0 => Some(Coordinates::new(to.i - 1, to.j)),
            Move::Horizontal if to.j > 0 => Some(Coordinates::new(to.i, to.j - 1)),
            _ => None,
        }
    }

    pub fn is_gap(self) -> bool {
        !matches!(self, Move::Diagonal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtraction_classifies_moves() {
        let prev = Coordinates::new(2, 3);
        assert_eq!((Coordinates::new(3, 4) - prev).as_move(), Some(Move::Diagonal));
        assert_eq!((Coordinates::new(3, 3) - prev).as_move(), Some(Move::Vertical));
        assert_eq!((Coordinates::new(2, 4) - prev).as_move(), Some(Move::Horizontal));
        assert_eq!((Coordinates::new(2, 3) - prev).as_move(), None);
        assert_eq!((Coordinates::new(1, 3) - prev), Offset::new(-1, 0));
    }

    #[test]
    fn test_predecessor_at_boundaries() {
        assert_eq!(Move::Diagonal.predecessor_of(Coordinates::new(0, 4)), None);
        assert_eq!(Move::Vertical.predecessor_of(Coordinates::new(0, 4)), None);
        assert_eq!(
            Move::Horizontal.predecessor_of(Coordinates::new(0, 4)),
            Some(Coordinates::new(0, 3))
        );
        assert_eq!(Move::Diagonal.predecessor_of(Coordinates::ORIGIN), None);
    }

    #[test]
    fn test_axis_index() {
        let c = Coordinates::new(5, 2);
        assert_eq!(c.index(SequenceDesignator::A), 5);
        assert_eq!(c.index(SequenceDesignator::B), 2);
        assert_eq!(c.diagonal(), 7);
    }
}
