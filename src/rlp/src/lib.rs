//! Recursive length prefix encoding, the canonical wire format for transactions.

mod error;
mod impls;
mod rlp;
mod rlpin;
mod traits;

pub use crate::error::Error;
pub use crate::rlp::RLPStream;
pub use crate::rlpin::{PayloadInfo, Rlp, RlpIterator};
pub use crate::traits::{Decodable, Encodable};

const STR_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;
const LEN_CUTOFF: u8 = 55;

/// The encoding of an empty list.
pub const EMPTY_LIST: u8 = LIST_OFFSET;

/// Encode a single value.
pub fn encode<E: Encodable + ?Sized>(object: &E) -> Vec<u8> {
    let mut stream = RLPStream::new();
    stream.append(object);
    stream.out()
}

/// Decode a single value. The whole input must be consumed by the value.
pub fn decode<T: Decodable>(bytes: &[u8]) -> Result<T, Error> {
    let rlp = Rlp::new(bytes);
    let info = rlp.payload_info()?;
    if info.total() != bytes.len() {
        return Err(Error::RlpIsTooBig);
    }
    rlp.as_val()
}
