//! Text rendering of an alignment solution

use seqalign_core::{AlignmentSolution, ContributionLevel, SequenceDesignator};
use std::fmt::{self, Write};

/// Intensity digit 0-9 for the magnitude of a level, '?' when there is no data
fn level_char(level: ContributionLevel) -> char {
    match level.value() {
        Some(value) => {
            let digit = (value.abs() * 9.0).round().clamp(0.0, 9.0) as u32;
            char::from_digit(digit, 10).unwrap_or('9')
        }
        None => '?',
    }
}

pub fn format_text(
    solution: &AlignmentSolution<'_>,
    line_width: usize,
    show_levels: bool,
) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_header(&mut out, solution)?;
    if !solution.is_empty() {
        write_blocks(&mut out, solution, line_width, show_levels)?;
    }
    Ok(out)
}

fn write_header(out: &mut String, solution: &AlignmentSolution<'_>) -> fmt::Result {
    let matrix = solution.matrix();
    let seq_a = matrix.sequence(SequenceDesignator::A);
    let seq_b = matrix.sequence(SequenceDesignator::B);
    let scoring = matrix.scoring();

    writeln!(out, "# A: {} ({} symbols)", seq_a.name, seq_a.len())?;
    writeln!(out, "# B: {} ({} symbols)", seq_b.name, seq_b.len())?;
    writeln!(
        out,
        "# Scoring: match {}, mismatch {}, gap {}",
        scoring.match_score, scoring.mismatch_penalty, scoring.gap_penalty
    )?;
    writeln!(out, "# Score: {}", solution.score())?;
    writeln!(
        out,
        "# Length: {}  Identity: {}/{} ({:.1}%)  Mismatches: {}  Gaps: {}",
        solution.len(),
        solution.identities(),
        solution.len(),
        solution.identity_fraction() * 100.0,
        solution.mismatches(),
        solution.gaps()
    )
}

fn write_blocks(
    out: &mut String,
    solution: &AlignmentSolution<'_>,
    line_width: usize,
    show_levels: bool,
) -> fmt::Result {
    let matrix = solution.matrix();
    let seq_a = matrix.sequence(SequenceDesignator::A);
    let seq_b = matrix.sequence(SequenceDesignator::B);

    // Lines are ASCII, so byte offsets are column offsets
    let width = if line_width == 0 { solution.len() } else { line_width };
    let levels: String = solution.levels().into_iter().map(level_char).collect();
    // Names may hold non-ASCII text; padding counts chars
    let lw = seq_a.name.chars().count().max(seq_b.name.chars().count());
    let nw = seq_a.len().max(seq_b.len()).to_string().len();
    let mut consumed_a = 0usize;
    let mut consumed_b = 0usize;

    let mut start = 0;
    while start < solution.len() {
        let end = (start + width).min(solution.len());
        let chunk_a = &solution.line_a()[start..end];
        let chunk_b = &solution.line_b()[start..end];

        let (from_a, to_a) = advance(&mut consumed_a, chunk_a);
        let (from_b, to_b) = advance(&mut consumed_b, chunk_b);

        out.push('\n');
        writeln!(out, "{:<lw$} {:>nw$} {} {}", seq_a.name, from_a, chunk_a, to_a)?;
        writeln!(out, "{:<lw$} {:>nw$} {}", "", "", &solution.line_alignment()[start..end])?;
        writeln!(out, "{:<lw$} {:>nw$} {} {}", seq_b.name, from_b, chunk_b, to_b)?;
        if show_levels {
            writeln!(out, "{:<lw$} {:>nw$} {}", "", "", &levels[start..end])?;
        }

        start = end;
    }

    Ok(())
}

/// 1-based first and last positions covered by a chunk; both equal the running total
/// when the chunk is all gaps
fn advance(consumed: &mut usize, chunk: &str) -> (usize, usize) {
    let symbols = chunk
        .bytes()
        .filter(|&b| b != AlignmentSolution::GAP_SYMBOL)
        .count();
    let from = if symbols == 0 { *consumed } else { *consumed + 1 };
    *consumed += symbols;
    (from, *consumed)
}
