use thiserror::Error;

/// Failures surfaced by the ledger store and the input boundary.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Malformed or missing user input; caught before it reaches the store.
    #[error("invalid input: {0}")]
    Validation(String),

    /// A read or write against the database failed.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),

    /// The database could not be opened or initialized at startup. Fatal.
    #[error("cannot open ledger database {path:?}: {source}")]
    Unavailable {
        path: String,
        source: rusqlite::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
