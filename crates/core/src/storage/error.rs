use thiserror::Error;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Item not found: {id}")]
    NotFound { id: u64 },
    #[error("Codice fiscale already exists: {codice_fiscale}")]
    DuplicateFiscalCode { codice_fiscale: String },
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Corrupted table: {0}")]
    Corrupted(String),
    #[error("I/O failed: {0}")]
    Io(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
