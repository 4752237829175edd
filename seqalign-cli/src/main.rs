use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use seqalign_core::FillStrategy;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod input;
mod report;

use config::{Config, OutputFormat};
use error::{print_error_and_exit, CliError};
use input::SequenceSource;

#[derive(Parser)]
#[command(name = "seqalign")]
#[command(about = "SeqAlign - optimal pairwise alignment with per-step traceback")]
#[command(version)]
#[command(long_about = "
SeqAlign computes the optimal global alignment of two sequences and prints the
three alignment lines, the total score and per-column contribution levels.

Examples:
  seqalign align --seq-a GATTACA --seq-b GCATGCU
  seqalign align --fasta-a a.fa --fasta-b b.fa --gap -2 --format json --out aln.json
  seqalign config --example > seqalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two sequences given inline or as FASTA/FASTQ files
    Align(AlignArgs),

    /// Print an example seqalign.toml
    Config {
        /// Print the example configuration
        #[arg(long)]
        example: bool,

        /// Write the example to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct AlignArgs {
    /// Sequence A as literal symbols
    #[arg(long, conflicts_with = "fasta_a")]
    pub seq_a: Option<String>,

    /// Sequence A from the first record of a FASTA/FASTQ file
    #[arg(long)]
    pub fasta_a: Option<PathBuf>,

    /// Display name for an inline sequence A
    #[arg(long)]
    pub name_a: Option<String>,

    /// Sequence B as literal symbols
    #[arg(long, conflicts_with = "fasta_b")]
    pub seq_b: Option<String>,

    /// Sequence B from the first record of a FASTA/FASTQ file
    #[arg(long)]
    pub fasta_b: Option<PathBuf>,

    /// Display name for an inline sequence B
    #[arg(long)]
    pub name_b: Option<String>,

    /// Score for identical symbols
    #[arg(long = "match", allow_hyphen_values = true)]
    pub match_score: Option<i32>,

    /// Score for different symbols
    #[arg(long, allow_hyphen_values = true)]
    pub mismatch: Option<i32>,

    /// Score for a symbol aligned to a gap
    #[arg(long, allow_hyphen_values = true)]
    pub gap: Option<i32>,

    /// Matrix fill strategy
    #[arg(long)]
    pub strategy: Option<StrategyArg>,

    /// Output format
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Columns per text block (0 disables wrapping)
    #[arg(long)]
    pub line_width: Option<usize>,

    /// Print contribution intensity under each text block
    #[arg(long)]
    pub show_levels: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum StrategyArg {
    Sequential,
    AntiDiagonal,
}

impl From<StrategyArg> for FillStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => FillStrategy::Sequential,
            StrategyArg::AntiDiagonal => FillStrategy::AntiDiagonal,
        }
    }
}

impl AlignArgs {
    /// CLI flags take precedence over the configuration file
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(score) = self.match_score {
            config.scoring.match_score = score;
        }
        if let Some(penalty) = self.mismatch {
            config.scoring.mismatch_penalty = penalty;
        }
        if let Some(penalty) = self.gap {
            config.scoring.gap_penalty = penalty;
        }
        if let Some(strategy) = self.strategy {
            config.engine.strategy = strategy.into();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(width) = self.line_width {
            config.output.line_width = width;
        }
        if self.show_levels {
            config.output.show_levels = true;
        }
    }
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    if quiet {
        std::env::set_var("RUST_LOG", "error");
    } else {
        let level = match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        std::env::set_var("RUST_LOG", level);
    }

    env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .init();

    Ok(())
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose, cli.quiet)?;

    // Load configuration
    let mut config = Config::load(cli.config.as_deref())?;

    // Set global thread count if specified
    if let Some(threads) = cli.threads.or(config.engine.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to set thread count")?;
    }

    match cli.command {
        Commands::Align(args) => {
            args.apply_overrides(&mut config);
            let source_a =
                SequenceSource::from_args("A", args.seq_a, args.fasta_a, args.name_a)?;
            let source_b =
                SequenceSource::from_args("B", args.seq_b, args.fasta_b, args.name_b)?;
            commands::align::execute(&config, source_a, source_b, args.out)?;
        }

        Commands::Config { example, out } => {
            if !example && out.is_none() {
                return Err(CliError::config("nothing to do; pass --example or --out").into());
            }
            commands::config::execute(out)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<CliError>() {
            Some(cli_error) => print_error_and_exit(cli_error),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_negative_scores() {
        let cli = Cli::try_parse_from([
            "seqalign", "align", "--seq-a", "GATTACA", "--seq-b", "GCATGCU", "--gap", "-2",
            "--mismatch", "-3", "--strategy", "anti-diagonal",
        ])
        .unwrap();
        let Commands::Align(args) = cli.command else {
            panic!("expected align command");
        };

        let mut config = Config::default();
        args.apply_overrides(&mut config);
        assert_eq!(config.scoring.gap_penalty, -2);
        assert_eq!(config.scoring.mismatch_penalty, -3);
        assert_eq!(config.scoring.match_score, 1);
        assert_eq!(config.engine.strategy, FillStrategy::AntiDiagonal);
    }

    #[test]
    fn test_cli_rejects_two_sources_for_one_sequence() {
        let result = Cli::try_parse_from([
            "seqalign", "align", "--seq-a", "AC", "--fasta-a", "a.fa", "--seq-b", "AC",
        ]);
        assert!(result.is_err());
    }
}
