use core::fmt::{Display, Formatter, Result as FmtResult};
use std::error::Error;
use std::io;
use std::path::PathBuf;

/// Failures raised while fetching, parsing, or looking up reference tables.
///
/// Every variant is fatal for the current document-generation pass. Callers
/// propagate these to the command layer, which reports them and exits.
#[derive(Debug)]
pub enum TableError {
    /// The table was not cached and could not be downloaded.
    RemoteFetch { table: String, url: String, reason: String },

    /// The cache directory or one of the cache files could not be written.
    CacheWrite { path: PathBuf, source: io::Error },

    /// A cached CSV file exists but could not be read.
    CacheRead { path: PathBuf, source: io::Error },

    /// The CSV content could not be parsed into a table.
    Parse { table: String, source: csv::Error },

    /// A row id is past the end of a table.
    RowNotFound { table: String, id: u64, total: usize },

    /// A row does not have the requested column.
    ColumnNotFound { table: String, column: String },

    /// A column value was expected to be an integer but is not.
    InvalidInteger { table: String, column: String, value: String },
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::RemoteFetch { table, url, reason } => write!(
                f,
                "could not download table '{table}' from {url} ({reason}); are you sure it exists? Table names are case-sensitive"
            ),
            Self::CacheWrite { path, .. } => write!(f, "unable to write cache file '{}'", path.display()),
            Self::CacheRead { path, .. } => write!(f, "unable to read cache file '{}'", path.display()),
            Self::Parse { table, .. } => write!(f, "unable to parse table '{table}'"),
            Self::RowNotFound { table, id, total } => {
                write!(f, "row {id} not found in table '{table}' ({total} rows)")
            }
            Self::ColumnNotFound { table, column } => write!(f, "table '{table}' has no column '{column}'"),
            Self::InvalidInteger { table, column, value } => {
                write!(f, "value '{value}' in column '{column}' of table '{table}' is not an integer")
            }
        }
    }
}

impl Error for TableError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CacheWrite { source, .. } | Self::CacheRead { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::RemoteFetch { .. } | Self::RowNotFound { .. } | Self::ColumnNotFound { .. } | Self::InvalidInteger { .. } => None,
        }
    }
}
