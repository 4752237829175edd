//! Align command implementation - fill the matrix, trace it back and print the solution

use anyhow::{Context, Result};
use seqalign_core::{AlignmentMatrix, AlignmentSolution};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{Config, OutputFormat};
use crate::error::CliError;
use crate::input::SequenceSource;
use crate::report::format_text;

pub fn execute(
    config: &Config,
    source_a: SequenceSource,
    source_b: SequenceSource,
    out: Option<PathBuf>,
) -> Result<()> {
    let seq_a = source_a.load().context("Failed to load sequence A")?;
    let seq_b = source_b.load().context("Failed to load sequence B")?;
    log::info!(
        "Aligning '{}' ({} symbols) against '{}' ({} symbols)",
        seq_a.name,
        seq_a.len(),
        seq_b.name,
        seq_b.len()
    );

    let start_time = Instant::now();
    let mut matrix =
        AlignmentMatrix::new(seq_a, seq_b, config.scoring).map_err(CliError::from)?;
    matrix
        .fill_with(config.engine.strategy)
        .map_err(CliError::from)?;
    let solution = AlignmentSolution::new(&matrix).map_err(CliError::from)?;
    log::info!(
        "Alignment completed in {:.3}s: score {}, {} columns",
        start_time.elapsed().as_secs_f64(),
        solution.score(),
        solution.len()
    );

    let rendered = match config.output.format {
        OutputFormat::Text => {
            format_text(&solution, config.output.line_width, config.output.show_levels)
                .context("Failed to format alignment")?
        }
        OutputFormat::Json => {
            let mut json = solution
                .report()
                .to_json_pretty()
                .context("Failed to serialize alignment report")?;
            json.push('\n');
            json
        }
    };

    match out {
        Some(path) => {
            std::fs::write(&path, rendered)
                .map_err(CliError::from)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Report written to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
