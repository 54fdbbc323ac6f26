use thiserror::Error;

/// Convenience result type for selection and scanning operations.
pub type PickResult<T> = Result<T, PickError>;

/// Error type shared across selection parsing, resolution, and scanning.
///
/// Every variant is terminal for the current source: the scanner stops
/// producing output and surfaces the error. End-of-input is not an error.
#[derive(Debug, Error)]
pub enum PickError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited record (bad quoting, inconsistent field count).
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A selection-list string that does not match the list grammar.
    #[error("{list:?}: invalid syntax")]
    InvalidList { list: String },

    /// Column indexes are 1-based; `0` is outside the domain.
    #[error("indexes are numbered from 1")]
    ZeroIndex,

    /// A header name occurs more than once in the header row, so name-based
    /// lookup is ambiguous.
    #[error("{name:?}: duplicated header")]
    DuplicatedHeader { name: String },

    /// Invalid run configuration (conflicting selection lists, malformed
    /// delimiter).
    #[error("{message}")]
    Config { message: String },
}
