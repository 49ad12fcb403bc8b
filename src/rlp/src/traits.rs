use crate::error::Error;
use crate::rlp::RLPStream;
use crate::rlpin::Rlp;

/// RLP encodable trait. Encode Self as exactly one item appended to the end of the stream.
pub trait Encodable {
    fn encode(&self, stream: &mut RLPStream);
}

/// RLP decodable trait. Decode Self from a single item.
pub trait Decodable: Sized {
    fn decode(rlp: &Rlp) -> Result<Self, Error>;
}
