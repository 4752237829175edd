//! Error handling for the SeqAlign CLI

use seqalign_core::AlignError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SeqAlign CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input/Output error: {message}")]
    Io { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Alignment error: {source}")]
    Alignment {
        #[from]
        source: AlignError,
    },
}

impl CliError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into() }
    }

    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat { message: message.into() }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(format!("TOML parsing error: {}", err))
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Provide helpful error messages and suggestions
pub fn format_error_with_suggestions(error: &CliError) -> String {
    let mut message = error.to_string();

    match error {
        CliError::FileNotFound { path } => {
            message.push_str(&format!(
                "\n\nSuggestions:\n\
                 • Check that the file path is correct: {}\n\
                 • Ensure you have read permissions for the file\n\
                 • Pass the sequence inline with --seq-a/--seq-b instead",
                path.display()
            ));
        }

        CliError::InvalidFormat { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Sequence files must be FASTA or FASTQ (optionally gzipped)\n\
                 • Ensure the file is not corrupted or truncated",
            );
        }

        CliError::Config { .. } => {
            message.push_str(
                "\n\nSuggestions:\n\
                 • Check your seqalign.toml configuration file\n\
                 • Use 'seqalign config --example' to generate a sample configuration",
            );
        }

        CliError::Alignment { source } => match source {
            AlignError::Configuration(_) => {
                message.push_str(
                    "\n\nSuggestions:\n\
                     • Sequences may only contain printable, non-whitespace ASCII symbols\n\
                     • '-', '+' and '.' are reserved for the alignment lines\n\
                     • Very large scores can overflow; reduce the scoring magnitudes",
                );
            }
            AlignError::Cancelled { .. } => {
                message.push_str("\n\nThe alignment was interrupted before completion.");
            }
            _ => {}
        },

        _ => {}
    }

    message
}

/// Print error with helpful suggestions and exit
pub fn print_error_and_exit(error: &CliError) -> ! {
    eprintln!("Error: {}", format_error_with_suggestions(error));
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = CliError::config("test message");
        assert!(matches!(err, CliError::Config { .. }));
        assert_eq!(err.to_string(), "Configuration error: test message");
    }

    #[test]
    fn test_error_suggestions() {
        let err = CliError::file_not_found(PathBuf::from("test.fa"));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("Suggestions:"));
        assert!(formatted.contains("Check that the file path is correct"));
    }

    #[test]
    fn test_alignment_error_conversion() {
        let err: CliError = AlignError::configuration("symbol '-' is reserved").into();
        assert!(matches!(err, CliError::Alignment { .. }));
        let formatted = format_error_with_suggestions(&err);
        assert!(formatted.contains("reserved for the alignment lines"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io { .. }));
    }
}
