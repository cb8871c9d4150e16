use std::path::PathBuf;
use thiserror::Error;

/// A record that could not be turned into a transaction.
/// `line` is 1-based and counts skipped empty lines too.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: expected at least txid, fee and weight, found {found} field(s)")]
    MissingField { line: usize, found: usize },

    #[error("line {line}: empty txid")]
    EmptyTxid { line: usize },

    #[error("line {line}: {field} {value:?} is not a non-negative integer")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: expected a single ';' separated parent field, found {found} fields")]
    TooManyFields { line: usize, found: usize },
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::MissingField { line, .. }
            | ParseError::EmptyTxid { line }
            | ParseError::InvalidNumber { line, .. }
            | ParseError::TooManyFields { line, .. } => *line,
        }
    }
}

/// Failure of a whole load call. No partial candidate set is ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("duplicate txid {txid} on line {line} (first seen on line {first_line})")]
    DuplicateKey {
        txid: String,
        line: usize,
        first_line: usize,
    },

    #[error("failed to read mempool file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported config file format {0:?}, use .toml")]
    UnsupportedFormat(String),

    #[error("config file {0} has no extension")]
    MissingExtension(PathBuf),

    #[error("config file {0} not found")]
    NotFound(PathBuf),

    #[error("invalid configuration: {0}")]
    Invalid(#[from] Box<figment::Error>),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
