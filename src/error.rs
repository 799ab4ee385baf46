use std::io;
use thiserror::Error;

/// Banking operation errors
#[derive(Debug, Error)]
pub enum BankError {
    /// Maximum number of accounts reached
    #[error("Maximum account limit reached")]
    CapacityExceeded,

    /// Invalid input (negative balance, bad amount, over-long field)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No account matching the supplied credentials. Deliberately does not
    /// distinguish "unknown account" from "wrong password".
    #[error("Invalid account number or password")]
    NotFound,

    /// Insufficient funds for a withdrawal or transfer
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Transfer destination account does not exist
    #[error("Destination account not found")]
    DestinationNotFound,

    /// Storage file could not be opened for the required mode
    #[error("Could not open {path}")]
    FileUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Other I/O failure while reading or writing a storage file
    #[error(transparent)]
    Io(#[from] io::Error),
}
