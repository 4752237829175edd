//! Sequence input for the CLI
//!
//! Sequences come either inline from the command line or from the first record of a
//! FASTA/FASTQ file parsed with needletail (gzip handled transparently).

use needletail::parse_fastx_file;
use seqalign_core::Sequence;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone)]
pub enum SequenceSource {
    Literal { name: String, text: String },
    File(PathBuf),
}

impl SequenceSource {
    /// Pick the source from the mutually exclusive inline/file arguments
    pub fn from_args(
        label: &str,
        literal: Option<String>,
        file: Option<PathBuf>,
        name: Option<String>,
    ) -> CliResult<Self> {
        match (literal, file) {
            (Some(text), None) => Ok(Self::Literal {
                name: name.unwrap_or_else(|| format!("seq_{}", label.to_lowercase())),
                text,
            }),
            (None, Some(path)) => Ok(Self::File(path)),
            (Some(_), Some(_)) => Err(CliError::config(format!(
                "sequence {} was given both inline and as a file",
                label
            ))),
            (None, None) => Err(CliError::config(format!("sequence {} is missing", label))),
        }
    }

    pub fn load(&self) -> CliResult<Sequence> {
        match self {
            Self::Literal { name, text } => Ok(Sequence::from_text(name.clone(), text.trim())?),
            Self::File(path) => load_first_record(path),
        }
    }
}

/// Read the first record of a FASTA/FASTQ file
pub fn load_first_record(path: &Path) -> CliResult<Sequence> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }

    let mut reader = parse_fastx_file(path)
        .map_err(|e| CliError::invalid_format(format!("{}: {}", path.display(), e)))?;

    let record = reader
        .next()
        .ok_or_else(|| CliError::invalid_format(format!("{}: no sequences found", path.display())))?
        .map_err(|e| CliError::invalid_format(format!("{}: {}", path.display(), e)))?;

    let name = String::from_utf8_lossy(record.id())
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string();
    let sequence = Sequence::new(name, record.seq().into_owned())?;

    if reader.next().is_some() {
        log::warn!(
            "{} holds more than one record; aligning only '{}'",
            path.display(),
            sequence.name
        );
    }

    log::info!(
        "Loaded '{}' ({} symbols) from {}",
        sequence.name,
        sequence.len(),
        path.display()
    );
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_fasta(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().expect("create temp fasta");
        write!(f, "{}", content).unwrap();
        f
    }

    #[test]
    fn test_literal_source() {
        let source = SequenceSource::from_args("A", Some("GATTACA".into()), None, None).unwrap();
        let seq = source.load().unwrap();
        assert_eq!(seq.name, "seq_a");
        assert_eq!(seq.symbols(), b"GATTACA");
    }

    #[test]
    fn test_conflicting_sources() {
        let err = SequenceSource::from_args("B", Some("AC".into()), Some(PathBuf::from("b.fa")), None)
            .unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
        assert!(SequenceSource::from_args("B", None, None, None).is_err());
    }

    #[test]
    fn test_first_fasta_record() {
        let fasta = write_fasta(">chr1 test sequence\nGATT\nACA\n>chr2\nCCCC\n");
        let seq = load_first_record(fasta.path()).unwrap();
        assert_eq!(seq.name, "chr1");
        assert_eq!(seq.symbols(), b"GATTACA");
    }

    #[test]
    fn test_missing_file() {
        let err = load_first_record(Path::new("does/not/exist.fa")).unwrap_err();
        assert!(matches!(err, CliError::FileNotFound { .. }));
    }

    #[test]
    fn test_reserved_symbol_in_literal_is_rejected_later() {
        // Loading succeeds; the solution refuses reserved symbols
        let source = SequenceSource::from_args("A", Some("AC-GT".into()), None, None).unwrap();
        assert!(source.load().is_ok());
    }
}
