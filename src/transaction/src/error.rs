use std::fmt;

/// Why a signature could not authenticate a sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    /// A raw signature must be exactly 65 bytes
    InvalidLength,
    /// `v` is outside the set the signer accepts
    InvalidV,
    /// `r` or `s` is zero
    ZeroValue,
    /// `r` or `s` is not below the curve order, or `s` is in the upper half
    OutOfRange,
    /// The chain id encoded in `v` is not the signer's
    ChainIdMismatch,
    /// Public key recovery failed
    Recovery,
}

/// Errors occur in this package
#[derive(Debug)]
pub enum Error {
    /// Malformed wire input
    Decode(rlp::Error),
    /// The transaction is unauthenticated and must not be admitted
    InvalidSignature(SignatureError),
    Json(serde_json::Error),
    Crypto(common::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Decode(e) => write!(f, "decode error: {}", e),
            Error::InvalidSignature(e) => write!(f, "invalid signature: {:?}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Crypto(e) => write!(f, "crypto error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<rlp::Error> for Error {
    fn from(e: rlp::Error) -> Self {
        Error::Decode(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<common::Error> for Error {
    fn from(e: common::Error) -> Self {
        Error::Crypto(e)
    }
}

impl From<SignatureError> for Error {
    fn from(e: SignatureError) -> Self {
        Error::InvalidSignature(e)
    }
}
