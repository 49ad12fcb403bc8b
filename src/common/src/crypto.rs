//! secp256k1 key handling, recoverable signing and public key recovery.

mod keypair;
mod recovery;

pub use keypair::{sign, KeyPair, Public, Secret};
pub use recovery::{public_to_address, recover, SIGNATURE_LENGTH};

use lazy_static::lazy_static;

lazy_static! {
    pub(crate) static ref SECP256K1: secp256k1::Secp256k1<secp256k1::All> = secp256k1::Secp256k1::new();
}
