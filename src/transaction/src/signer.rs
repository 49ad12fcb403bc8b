use std::fmt;

use common::{ensure, keccak, public_to_address, recover, Address, H256, SIGNATURE_LENGTH, U256};
use rlp::RLPStream;
use serde::{Deserialize, Serialize};

use crate::transaction::{SignatureHashType, Transaction};
use crate::{Error, SignatureError};

/// The secp256k1 curve order
const SECP256K1_N: U256 = U256([
    0xBFD25E8CD0364141,
    0xBAAEDCE6AF48A03B,
    0xFFFFFFFFFFFFFFFE,
    0xFFFFFFFFFFFFFFFF,
]);

/// Half the curve order. Homestead rejects `s` above it.
const SECP256K1_HALF_N: U256 = U256([
    0xDFE92F46681B20A0,
    0x5D576E7357A4501D,
    0xFFFFFFFFFFFFFFFF,
    0x7FFFFFFFFFFFFFFF,
]);

const ETH_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

/// Identifies a signature scheme together with its parameters.
/// Two signers are equal when their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SignerKind {
    Homestead,
    Eip155 {
        #[serde(rename = "chainId")]
        chain_id: u64,
    },
    Ovm {
        #[serde(rename = "chainId")]
        chain_id: u64,
    },
}

impl SignerKind {
    /// Build the signer this kind describes.
    pub fn signer(&self) -> Box<dyn Signer> {
        match *self {
            SignerKind::Homestead => Box::new(HomesteadSigner),
            SignerKind::Eip155 { chain_id } => Box::new(Eip155Signer::new(chain_id)),
            SignerKind::Ovm { chain_id } => Box::new(OvmSigner::new(chain_id)),
        }
    }
}

/// A signature scheme: what gets signed, how the signature is laid out in
/// `(v, r, s)` and how the sender is recovered from it.
pub trait Signer: fmt::Debug + Send + Sync {
    /// The digest the sender signs.
    fn hash(&self, tx: &Transaction) -> H256;

    /// Recovers the address that signed `tx`.
    fn sender(&self, tx: &Transaction) -> Result<Address, Error>;

    /// Converts a 65 byte `[R || S || recovery id]` signature into `(v, r, s)`.
    fn signature_values(&self, tx: &Transaction, sig: &[u8]) -> Result<(U256, U256, U256), Error>;

    fn kind(&self) -> SignerKind;

    fn equal(&self, other: &dyn Signer) -> bool {
        self.kind() == other.kind()
    }
}

/// Pre chain-id signatures: `v` is 27 or 28 and `s` must be in the lower half.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HomesteadSigner;

impl Signer for HomesteadSigner {
    fn hash(&self, tx: &Transaction) -> H256 {
        let mut stream = RLPStream::new_list(6);
        tx.rlp_append_unsigned(&mut stream);
        keccak(stream.out())
    }

    fn sender(&self, tx: &Transaction) -> Result<Address, Error> {
        let (v, r, s) = tx.raw_signature_values();
        recover_plain(self.hash(tx), &r, &s, &v, true)
    }

    fn signature_values(&self, _tx: &Transaction, sig: &[u8]) -> Result<(U256, U256, U256), Error> {
        homestead_signature_values(sig)
    }

    fn kind(&self) -> SignerKind {
        SignerKind::Homestead
    }
}

/// Replay protected signatures: the chain id is hashed in and folded into
/// `v = recovery id + 35 + 2 * chain id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eip155Signer {
    chain_id: u64,
}

impl Eip155Signer {
    pub fn new(chain_id: u64) -> Self {
        Eip155Signer { chain_id }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn chain_id_mul(&self) -> U256 {
        U256::from(self.chain_id) * 2
    }

    /// The digest an unprotected or a protected `v` was produced over.
    fn recovery_hash(&self, tx: &Transaction) -> H256 {
        if tx.is_protected() {
            self.hash(tx)
        } else {
            HomesteadSigner.hash(tx)
        }
    }

    /// Recovers against `sighash`, so wrappers can swap the digest.
    fn sender_with_hash(&self, tx: &Transaction, sighash: H256) -> Result<Address, Error> {
        if !tx.is_protected() {
            let (v, r, s) = tx.raw_signature_values();
            return recover_plain(sighash, &r, &s, &v, true);
        }
        let chain_id = tx.chain_id();
        if chain_id != U256::from(self.chain_id) {
            log::debug!("chain id mismatch: tx has {}, signer expects {}", chain_id, self.chain_id);
            return Err(SignatureError::ChainIdMismatch.into());
        }
        let (v, r, s) = tx.raw_signature_values();
        let v = v
            .checked_sub(self.chain_id_mul() + U256::from(8))
            .ok_or(Error::InvalidSignature(SignatureError::InvalidV))?;
        recover_plain(sighash, &r, &s, &v, true)
    }
}

impl Signer for Eip155Signer {
    /// Chain id zero signs the homestead digest, matching its `v` of 27 or 28.
    fn hash(&self, tx: &Transaction) -> H256 {
        if self.chain_id == 0 {
            return HomesteadSigner.hash(tx);
        }
        let mut stream = RLPStream::new_list(9);
        tx.rlp_append_unsigned(&mut stream);
        stream.append(&self.chain_id).append(&0u8).append(&0u8);
        keccak(stream.out())
    }

    fn sender(&self, tx: &Transaction) -> Result<Address, Error> {
        self.sender_with_hash(tx, self.recovery_hash(tx))
    }

    fn signature_values(&self, _tx: &Transaction, sig: &[u8]) -> Result<(U256, U256, U256), Error> {
        let (v, r, s) = homestead_signature_values(sig)?;
        if self.chain_id == 0 {
            return Ok((v, r, s));
        }
        Ok((U256::from(sig[64]) + 35 + self.chain_id_mul(), r, s))
    }

    fn kind(&self) -> SignerKind {
        SignerKind::Eip155 { chain_id: self.chain_id }
    }
}

/// EIP155 signatures, except that transactions tagged with
/// [`SignatureHashType::EthSign`] sign the `personal_sign` digest of their
/// legacy payload hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvmSigner {
    inner: Eip155Signer,
}

impl OvmSigner {
    pub fn new(chain_id: u64) -> Self {
        OvmSigner { inner: Eip155Signer::new(chain_id) }
    }

    pub fn chain_id(&self) -> u64 {
        self.inner.chain_id
    }
}

impl Signer for OvmSigner {
    fn hash(&self, tx: &Transaction) -> H256 {
        match tx.signature_hash_type() {
            Some(SignatureHashType::EthSign) => eth_sign_hash(&HomesteadSigner.hash(tx)),
            _ => self.inner.hash(tx),
        }
    }

    fn sender(&self, tx: &Transaction) -> Result<Address, Error> {
        let sighash = match tx.signature_hash_type() {
            Some(SignatureHashType::EthSign) => self.hash(tx),
            _ => self.inner.recovery_hash(tx),
        };
        self.inner.sender_with_hash(tx, sighash)
    }

    fn signature_values(&self, tx: &Transaction, sig: &[u8]) -> Result<(U256, U256, U256), Error> {
        self.inner.signature_values(tx, sig)
    }

    fn kind(&self) -> SignerKind {
        SignerKind::Ovm { chain_id: self.inner.chain_id }
    }
}

/// keccak256("\x19Ethereum Signed Message:\n32" || hash)
pub fn eth_sign_hash(hash: &H256) -> H256 {
    let mut message = Vec::with_capacity(ETH_SIGN_PREFIX.len() + 32);
    message.extend_from_slice(ETH_SIGN_PREFIX);
    message.extend_from_slice(hash.as_bytes());
    keccak(message)
}

pub(crate) fn is_protected_v(v: &U256) -> bool {
    if v.bits() <= 8 {
        let v = v.low_u64();
        return v != 27 && v != 28;
    }
    true
}

/// The chain id folded into `v`. Unprotected values yield zero.
pub fn derive_chain_id(v: &U256) -> U256 {
    if !is_protected_v(v) {
        return U256::zero();
    }
    v.saturating_sub(U256::from(35)) / 2
}

fn homestead_signature_values(sig: &[u8]) -> Result<(U256, U256, U256), Error> {
    ensure!(sig.len() == SIGNATURE_LENGTH, Error::InvalidSignature(SignatureError::InvalidLength))?;
    let r = U256::from_big_endian(&sig[0..32]);
    let s = U256::from_big_endian(&sig[32..64]);
    let v = U256::from(sig[64]) + 27;
    Ok((v, r, s))
}

fn validate_signature_values(r: &U256, s: &U256, homestead: bool) -> Result<(), SignatureError> {
    ensure!(!r.is_zero() && !s.is_zero(), SignatureError::ZeroValue)?;
    ensure!(!homestead || *s <= SECP256K1_HALF_N, SignatureError::OutOfRange)?;
    ensure!(*r < SECP256K1_N && *s < SECP256K1_N, SignatureError::OutOfRange)
}

/// Recovers the signer of `sighash` from a signature whose `v` is 27 or 28.
fn recover_plain(sighash: H256, r: &U256, s: &U256, v: &U256, homestead: bool) -> Result<Address, Error> {
    ensure!(*v == U256::from(27) || *v == U256::from(28), SignatureError::InvalidV)?;
    validate_signature_values(r, s, homestead)?;

    let mut sig = [0u8; SIGNATURE_LENGTH];
    r.to_big_endian(&mut sig[0..32]);
    s.to_big_endian(&mut sig[32..64]);
    sig[64] = (v.low_u64() - 27) as u8;

    let public = recover(&sig, &sighash).map_err(|e| {
        log::debug!("cannot recover public key: {}", e);
        Error::InvalidSignature(SignatureError::Recovery)
    })?;
    Ok(public_to_address(&public))
}
