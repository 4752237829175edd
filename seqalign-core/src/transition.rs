use crate::coords::{Coordinates, Move};
use crate::types::SequenceDesignator;
use serde::{Deserialize, Serialize};

/// One cell of a filled alignment matrix: the best cumulative score reaching it and
/// the move that produced that score.
///
/// The predecessor is stored as the arrival move rather than a pointer, so the back-links
/// form a tree over the matrix arena rooted at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    coords: Coordinates,
    score: i32,
    arrival: Option<Move>,
}

impl Transition {
    pub fn new(coords: Coordinates, score: i32, arrival: Option<Move>) -> Self {
        Self {
            coords,
            score,
            arrival,
        }
    }

    pub fn origin() -> Self {
        Self::new(Coordinates::ORIGIN, 0, None)
    }

    pub fn coords(&self) -> Coordinates {
        self.coords
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn index(&self, designator: SequenceDesignator) -> usize {
        self.coords.index(designator)
    }

    /// Move taken from the predecessor, `None` at the origin
    pub fn arrival(&self) -> Option<Move> {
        self.arrival
    }

    pub fn predecessor(&self) -> Option<Coordinates> {
        self.arrival.and_then(|step| step.predecessor_of(self.coords))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_has_no_predecessor() {
        let origin = Transition::origin();
        assert_eq!(origin.score(), 0);
        assert!(origin.coords().is_origin());
        assert_eq!(origin.predecessor(), None);
    }

    #[test]
    fn test_predecessor_follows_arrival_move() {
        let t = Transition::new(Coordinates::new(3, 2), -1, Some(Move::Vertical));
        assert_eq!(t.predecessor(), Some(Coordinates::new(2, 2)));
        assert_eq!(t.index(SequenceDesignator::A), 3);
    }
}
