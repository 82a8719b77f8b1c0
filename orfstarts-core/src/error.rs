use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartsError {
    #[error("invalid character '{ch}' at position {pos}")]
    InvalidChar { ch: char, pos: usize },

    #[error("invalid strand '{strand}' (expected '+' or '-')")]
    InvalidStrand { strand: String },

    #[error("fasta format error at line {line}: {msg}")]
    FastaFormat { msg: &'static str, line: usize },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("table missing column '{name}' in {path}. headers: {headers:?}")]
    MissingColumn {
        name: String,
        headers: Vec<String>,
        path: String,
    },

    #[error("table missing field at row {row} for column {column} in {path}")]
    MissingField {
        row: usize,
        column: String,
        path: String,
    },

    #[error("malformed location '{value}' at row {row} in {path} (expected '<contig>;<position>')")]
    MalformedLocation {
        row: usize,
        value: String,
        path: String,
    },

    #[error("invalid number '{value}' at row {row} for column {column} in {path}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
        path: String,
    },

    #[error("failed to configure thread pool: {0}")]
    ThreadPool(String),

    #[error("table parse error in {path}: {source}")]
    TableParse {
        path: String,
        #[source]
        source: csv::Error,
    },
}

pub type StartsResult<T> = Result<T, StartsError>;
