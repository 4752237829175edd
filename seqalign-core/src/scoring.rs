//! Linear-gap scoring configuration

use serde::{Deserialize, Serialize};

/// Scores applied by the alignment recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    /// Score for aligning two equal symbols
    #[serde(default = "default_match_score")]
    pub match_score: i32,
    /// Score for aligning two different symbols (conventionally <= 0)
    #[serde(default = "default_mismatch_penalty")]
    pub mismatch_penalty: i32,
    /// Score for aligning a symbol against a gap (conventionally <= 0)
    #[serde(default = "default_gap_penalty")]
    pub gap_penalty: i32,
}

fn default_match_score() -> i32 { 1 }
fn default_mismatch_penalty() -> i32 { -1 }
fn default_gap_penalty() -> i32 { -1 }

impl Default for ScoringScheme {
    fn default() -> Self {
        Self::unit()
    }
}

impl ScoringScheme {
    pub fn new(match_score: i32, mismatch_penalty: i32, gap_penalty: i32) -> Self {
        Self {
            match_score,
            mismatch_penalty,
            gap_penalty,
        }
    }

    pub fn unit() -> Self {
        Self::new(default_match_score(), default_mismatch_penalty(), default_gap_penalty())
    }

    /// Negated Levenshtein distance: the terminal score is minus the edit distance
    pub fn edit_distance() -> Self {
        Self::new(0, -1, -1)
    }

    pub fn dna() -> Self {
        Self::new(2, -1, -2)
    }

    /// Score of the diagonal move aligning `a` with `b`
    pub fn substitution(&self, a: u8, b: u8) -> i32 {
        if a == b {
            self.match_score
        } else {
            self.mismatch_penalty
        }
    }

    pub fn gap(&self) -> i32 {
        self.gap_penalty
    }

    /// Report unconventional settings. Any integer triple is accepted.
    pub fn validate(&self) {
        if self.gap_penalty > 0 {
            log::warn!(
                "Gap penalty {} is positive; alignments will favour gaps",
                self.gap_penalty
            );
        }
        if self.mismatch_penalty > 0 {
            log::warn!(
                "Mismatch penalty {} is positive; mismatches will be rewarded",
                self.mismatch_penalty
            );
        }
        if self.match_score <= self.mismatch_penalty {
            log::warn!(
                "Match score {} does not exceed mismatch penalty {}",
                self.match_score,
                self.mismatch_penalty
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unit() {
        let scheme = ScoringScheme::default();
        assert_eq!(scheme, ScoringScheme::new(1, -1, -1));
    }

    #[test]
    fn test_substitution() {
        let scheme = ScoringScheme::dna();
        assert_eq!(scheme.substitution(b'A', b'A'), 2);
        assert_eq!(scheme.substitution(b'A', b'C'), -1);
        assert_eq!(scheme.gap(), -2);
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let scheme: ScoringScheme = serde_json::from_str(r#"{"gap_penalty": -3}"#).unwrap();
        assert_eq!(scheme.match_score, 1);
        assert_eq!(scheme.mismatch_penalty, -1);
        assert_eq!(scheme.gap_penalty, -3);
    }
}
