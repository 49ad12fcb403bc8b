//! The rollup transaction: its data model, signature schemes, wire encoding
//! and the execution-ready message derived from it.

mod codec;
mod error;
mod json;
mod message;
mod signer;
mod transaction;

pub use crate::codec::{CORE_FIELDS, EXTENSION_FIELDS};
pub use crate::error::{Error, SignatureError};
pub use crate::message::{Message, QueueOrigin};
pub use crate::signer::{
    derive_chain_id, eth_sign_hash, Eip155Signer, HomesteadSigner, OvmSigner, Signer, SignerKind,
};
pub use crate::transaction::{sign_tx, SignatureHashType, Transaction, TxMeta};
