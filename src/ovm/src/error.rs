use std::fmt;

use common::U256;

/// A message could not be laid out in the contract calldata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingError {
    /// `field` does not fit in `width` bytes
    FieldOverflow { field: &'static str, width: usize },
    /// Contract creations cannot be routed through the execution manager
    MissingEntrypoint,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::FieldOverflow { field, width } => {
                write!(f, "{} does not fit in {} bytes", field, width)
            }
            EncodingError::MissingEntrypoint => write!(f, "message has no entrypoint"),
        }
    }
}

/// Errors occur in this package
#[derive(Debug)]
pub enum Error {
    Transaction(transaction::Error),
    InvalidQueueOrigin(U256),
    Encoding(EncodingError),
    Config(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transaction(e) => write!(f, "{}", e),
            Error::InvalidQueueOrigin(code) => write!(f, "invalid queue origin: {}", code),
            Error::Encoding(e) => write!(f, "encoding error: {}", e),
            Error::Config(e) => write!(f, "invalid config: {}", e),
            Error::Io(e) => write!(f, "io error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<transaction::Error> for Error {
    fn from(e: transaction::Error) -> Self {
        Error::Transaction(e)
    }
}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Self {
        Error::Encoding(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}
