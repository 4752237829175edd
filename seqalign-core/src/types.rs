use crate::error::{AlignError, AlignResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which of the two aligned sequences an operation refers to.
///
/// Sequence A runs along the first matrix axis (`i`), sequence B along the second (`j`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceDesignator {
    A,
    B,
}

impl SequenceDesignator {
    pub const ALL: [SequenceDesignator; 2] = [SequenceDesignator::A, SequenceDesignator::B];

    /// Pick the value belonging to this sequence out of an `(a, b)` pair
    pub fn select<T>(self, a: T, b: T) -> T {
        match self {
            SequenceDesignator::A => a,
            SequenceDesignator::B => b,
        }
    }

    pub fn other(self) -> Self {
        match self {
            SequenceDesignator::A => SequenceDesignator::B,
            SequenceDesignator::B => SequenceDesignator::A,
        }
    }
}

impl fmt::Display for SequenceDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceDesignator::A => f.write_str("sequence A"),
            SequenceDesignator::B => f.write_str("sequence B"),
        }
    }
}

impl From<SequenceDesignator> for char {
    fn from(designator: SequenceDesignator) -> Self {
        match designator {
            SequenceDesignator::A => 'A',
            SequenceDesignator::B => 'B',
        }
    }
}

/// A named sequence of single-byte symbols.
///
/// Symbols are restricted to printable, non-whitespace ASCII so every symbol maps to
/// exactly one output column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    pub name: String,
    symbols: Vec<u8>,
}

impl Sequence {
    pub fn new<N: Into<String>, S: Into<Vec<u8>>>(name: N, symbols: S) -> AlignResult<Self> {
        let name = name.into();
        let symbols = symbols.into();

        if let Some(pos) = symbols.iter().position(|b| !b.is_ascii_graphic()) {
            return Err(AlignError::configuration(format!(
                "sequence '{}' has a non-printable symbol 0x{:02x} at position {}",
                name, symbols[pos], pos
            )));
        }

        Ok(Self { name, symbols })
    }

    pub fn from_text<N: Into<String>>(name: N, text: &str) -> AlignResult<Self> {
        Self::new(name, text.as_bytes())
    }

    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol at a 1-based position, i.e. the symbol consumed when a matrix axis reaches `index`
    pub fn symbol_at(&self, index: usize) -> Option<u8> {
        index.checked_sub(1).and_then(|i| self.symbols.get(i).copied())
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Symbols are validated ASCII
        f.write_str(&String::from_utf8_lossy(&self.symbols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_designator_select() {
        assert_eq!(SequenceDesignator::A.select(3, 7), 3);
        assert_eq!(SequenceDesignator::B.select(3, 7), 7);
        assert_eq!(SequenceDesignator::A.other(), SequenceDesignator::B);
        assert_eq!(char::from(SequenceDesignator::B), 'B');
    }

    #[test]
    fn test_symbol_at_is_one_based() {
        let seq = Sequence::from_text("s", "GAT").unwrap();
        assert_eq!(seq.symbol_at(0), None);
        assert_eq!(seq.symbol_at(1), Some(b'G'));
        assert_eq!(seq.symbol_at(3), Some(b'T'));
        assert_eq!(seq.symbol_at(4), None);
    }

    #[test]
    fn test_rejects_whitespace() {
        let err = Sequence::from_text("bad", "AC GT").unwrap_err();
        assert!(matches!(err, AlignError::Configuration(_)));
    }

    #[test]
    fn test_empty_sequence_is_allowed() {
        let seq = Sequence::from_text("empty", "").unwrap();
        assert!(seq.is_empty());
        assert_eq!(seq.to_string(), "");
    }
}
