use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, merging, or transforming network tables.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Edge file width outside {3, 4}.
    #[error("edge file {path} must have three or four columns but found {found}")]
    MalformedInteractome { path: PathBuf, found: usize },

    /// A direction-bearing column holds a value outside its enumerated set.
    #[error("column '{column}' must hold {expected}, but found '{value}'")]
    InvalidDirection {
        column: String,
        value: String,
        expected: String,
    },

    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    #[error("cannot insert column at position {position} in a table of width {width}")]
    InvalidColumnPosition { position: usize, width: usize },

    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Raised only under [`crate::ConflictPolicy::Fail`].
    #[error("node attribute column '{column}' from {path} is already defined")]
    NodeColumnConflict { column: String, path: PathBuf },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unsupported snapshot format version {0}")]
    UnsupportedSnapshotVersion(u32),

    #[error("no algorithm registered under '{0}'")]
    UnknownAlgorithm(String),

    #[error("algorithm '{name}' failed: {message}")]
    Algorithm { name: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
