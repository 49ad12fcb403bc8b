use std::fmt;

#[derive(Debug)]
pub enum Error {
    Secp256k1(secp256k1::Error),
    CannotParseHexString,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Secp256k1(e) => write!(f, "secp256k1: {}", e),
            Error::CannotParseHexString => write!(f, "cannot parse hex string"),
        }
    }
}

impl std::error::Error for Error {}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Error::Secp256k1(e)
    }
}

impl From<rustc_hex::FromHexError> for Error {
    fn from(_: rustc_hex::FromHexError) -> Self {
        Error::CannotParseHexString
    }
}
