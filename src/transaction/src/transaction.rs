use std::sync::OnceLock;

use common::{keccak, sign, Address, Secret, H256, U256};
use serde::{Deserialize, Serialize};

use crate::signer::{derive_chain_id, is_protected_v, Signer, SignerKind};
use crate::Error;

/// The digest a rollup transaction was signed over, on top of its signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureHashType {
    /// The chain-id aware payload digest
    #[serde(rename = "eip155")]
    Eip155,
    /// The `personal_sign` digest of the legacy payload hash
    #[serde(rename = "ethSign")]
    EthSign,
}

impl SignatureHashType {
    /// The tag written on the wire.
    pub fn code(&self) -> u8 {
        match self {
            SignatureHashType::Eip155 => 0,
            SignatureHashType::EthSign => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(SignatureHashType::Eip155),
            1 => Some(SignatureHashType::EthSign),
            _ => None,
        }
    }
}

/// The signed payload plus the signature values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct TxData {
    pub nonce: u64,
    pub gas_price: U256,
    pub gas_limit: u64,
    /// `None` creates a contract
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

/// Rollup metadata. None of it is covered by the transaction hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TxMeta {
    pub l1_message_sender: Option<Address>,
    pub l1_rollup_tx_id: Option<u64>,
    pub signature_hash_type: Option<SignatureHashType>,
}

/// An immutable rollup transaction. Modifications produce new values.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub(crate) data: TxData,
    pub(crate) meta: TxMeta,
    hash: OnceLock<H256>,
    /// The last recovered sender, keyed by the signer that recovered it
    from: OnceLock<(SignerKind, Address)>,
}

impl Transaction {
    pub(crate) fn from_parts(data: TxData, meta: TxMeta) -> Self {
        Transaction { data, meta, hash: OnceLock::new(), from: OnceLock::new() }
    }

    /// An unsigned call or transfer to `to`.
    pub fn new(
        nonce: u64,
        to: Address,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        data: Vec<u8>,
    ) -> Self {
        Self::from_parts(
            TxData { nonce, gas_price, gas_limit, to: Some(to), value, data, ..Default::default() },
            TxMeta::default(),
        )
    }

    /// An unsigned transaction without a recipient.
    pub fn new_contract_creation(
        nonce: u64,
        value: U256,
        gas_limit: u64,
        gas_price: U256,
        data: Vec<u8>,
    ) -> Self {
        Self::from_parts(
            TxData { nonce, gas_price, gas_limit, to: None, value, data, ..Default::default() },
            TxMeta::default(),
        )
    }

    pub fn with_meta(self, meta: TxMeta) -> Self {
        Self::from_parts(self.data, meta)
    }

    pub fn with_l1_message_sender(mut self, sender: Address) -> Self {
        self.meta.l1_message_sender = Some(sender);
        self.with_meta_changed()
    }

    pub fn with_l1_rollup_tx_id(mut self, id: u64) -> Self {
        self.meta.l1_rollup_tx_id = Some(id);
        self.with_meta_changed()
    }

    pub fn with_signature_hash_type(mut self, hash_type: SignatureHashType) -> Self {
        self.meta.signature_hash_type = Some(hash_type);
        self.with_meta_changed()
    }

    /// The hash type picks the digest some signers recover from.
    fn with_meta_changed(self) -> Self {
        Self::from_parts(self.data, self.meta)
    }

    /// A copy of this transaction carrying the signature `sig` in the form
    /// `signer` expects. `sig` is `[R || S || recovery id]`.
    pub fn with_signature(&self, signer: &dyn Signer, sig: &[u8]) -> Result<Self, Error> {
        let (v, r, s) = signer.signature_values(self, sig)?;
        let mut data = self.data.clone();
        data.v = v;
        data.r = r;
        data.s = s;
        Ok(Self::from_parts(data, self.meta.clone()))
    }

    pub fn nonce(&self) -> u64 {
        self.data.nonce
    }

    pub fn gas_price(&self) -> U256 {
        self.data.gas_price
    }

    pub fn gas(&self) -> u64 {
        self.data.gas_limit
    }

    pub fn to(&self) -> Option<Address> {
        self.data.to
    }

    pub fn value(&self) -> U256 {
        self.data.value
    }

    pub fn data(&self) -> &[u8] {
        &self.data.data
    }

    pub fn meta(&self) -> &TxMeta {
        &self.meta
    }

    pub fn l1_message_sender(&self) -> Option<Address> {
        self.meta.l1_message_sender
    }

    pub fn l1_rollup_tx_id(&self) -> Option<u64> {
        self.meta.l1_rollup_tx_id
    }

    pub fn signature_hash_type(&self) -> Option<SignatureHashType> {
        self.meta.signature_hash_type
    }

    /// `(v, r, s)` exactly as stored.
    pub fn raw_signature_values(&self) -> (U256, U256, U256) {
        (self.data.v, self.data.r, self.data.s)
    }

    /// The chain id folded into `v`, zero for unprotected transactions.
    pub fn chain_id(&self) -> U256 {
        derive_chain_id(&self.data.v)
    }

    pub fn is_protected(&self) -> bool {
        is_protected_v(&self.data.v)
    }

    pub fn is_signed(&self) -> bool {
        !self.data.r.is_zero() && !self.data.s.is_zero()
    }

    /// keccak256 of the nine core fields. Rollup metadata is not covered.
    pub fn hash(&self) -> H256 {
        *self.hash.get_or_init(|| keccak(self.core_rlp()))
    }

    /// Recovers the sender with `signer`. The result is cached, and reused only
    /// when asked again through an equal signer.
    pub fn sender(&self, signer: &dyn Signer) -> Result<Address, Error> {
        let kind = signer.kind();
        if let Some((cached_kind, from)) = self.from.get() {
            if *cached_kind == kind {
                return Ok(*from);
            }
        }
        let from = signer.sender(self)?;
        let _ = self.from.set((kind, from));
        Ok(from)
    }

    /// The canonical wire encoding.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self)
    }

    /// Parses the canonical wire encoding. No bytes may follow the transaction.
    pub fn decode_rlp(bytes: &[u8]) -> Result<Self, Error> {
        Ok(rlp::decode(bytes)?)
    }
}

/// Equality covers the signed payload and signature; rollup metadata and
/// caches are ignored.
impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for Transaction {}

/// Signs `tx` with `secret` under `signer` and returns the signed copy.
pub fn sign_tx(tx: &Transaction, signer: &dyn Signer, secret: &Secret) -> Result<Transaction, Error> {
    let hash = signer.hash(tx);
    let sig = sign(secret, &hash)?;
    tx.with_signature(signer, &sig)
}

#[cfg(test)]
mod tests {
    use common::{from_hex, Address, KeyPair, Secret, U256};

    use crate::{sign_tx, Eip155Signer, HomesteadSigner, SignatureHashType, Signer, Transaction};

    fn address(s: &str) -> Address {
        Address::from_slice(&from_hex(s).unwrap())
    }

    fn empty_tx() -> Transaction {
        Transaction::new(
            0,
            address("095e7baea6a6c7c4c2dfeb977efac326af552d87"),
            U256::zero(),
            0,
            U256::zero(),
            vec![],
        )
    }

    #[test]
    fn homestead_sighash_works() {
        let tagged = empty_tx()
            .with_l1_message_sender(address("0000000000000000000000000000000000000001"))
            .with_l1_rollup_tx_id(1)
            .with_signature_hash_type(SignatureHashType::EthSign);
        for tx in [empty_tx(), tagged] {
            assert_eq!(
                hex::encode(HomesteadSigner.hash(&tx)),
                "c775b99e7ad12f50d819fcd602390467e28141316969f4b57f0626f74fe3b386"
            );
        }
    }

    #[test]
    fn rollup_meta_does_not_change_hash() {
        let tx = empty_tx();
        let hash = tx.hash();
        let tx = tx
            .with_l1_message_sender(Address::repeat_byte(1))
            .with_l1_rollup_tx_id(7)
            .with_signature_hash_type(SignatureHashType::EthSign);
        assert_eq!(tx.hash(), hash);
        assert_eq!(tx, empty_tx());
        assert_eq!(tx.l1_rollup_tx_id(), Some(7));
    }

    #[test]
    fn with_signature_keeps_original() {
        let tx = empty_tx();
        let mut sig = [1u8; 65];
        sig[64] = 1;
        let signed = tx.with_signature(&HomesteadSigner, &sig).unwrap();
        assert!(!tx.is_signed());
        assert!(signed.is_signed());
        let (v, r, s) = signed.raw_signature_values();
        assert_eq!(v, U256::from(28));
        assert_eq!(r, U256::from_big_endian(&[1u8; 32]));
        assert_eq!(s, r);
        assert_ne!(tx.hash(), signed.hash());
    }

    #[test]
    fn half_zero_signature_is_unsigned() {
        let mut r_only = [0u8; 65];
        r_only[31] = 1;
        let mut s_only = [0u8; 65];
        s_only[63] = 1;
        for sig in [r_only, s_only] {
            let tx = empty_tx().with_signature(&HomesteadSigner, &sig).unwrap();
            assert!(!tx.is_signed());
        }
    }

    #[test]
    fn with_signature_rejects_short_signature() {
        assert!(empty_tx().with_signature(&HomesteadSigner, &[0u8; 64]).is_err());
    }

    #[test]
    fn sign_then_sender_works() {
        let secret =
            Secret::copy_from_str("45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8")
                .unwrap();
        let pair = KeyPair::from_secret(secret.clone()).unwrap();
        let signer = Eip155Signer::new(18);

        let signed = sign_tx(&empty_tx(), &signer, &secret).unwrap();
        assert!(signed.is_protected());
        assert_eq!(signed.chain_id(), U256::from(18));
        assert_eq!(signed.sender(&signer).unwrap(), pair.address());
        // served from the cache the second time
        assert_eq!(signed.sender(&signer).unwrap(), pair.address());
        assert!(signed.sender(&Eip155Signer::new(19)).is_err());
    }

    #[test]
    fn homestead_signed_is_unprotected() {
        let secret =
            Secret::copy_from_str("45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8")
                .unwrap();
        let signed = sign_tx(&empty_tx(), &HomesteadSigner, &secret).unwrap();
        assert!(!signed.is_protected());
        assert_eq!(signed.chain_id(), U256::zero());
        // an EIP155 signer falls back to the homestead rules
        let from = signed.sender(&Eip155Signer::new(1)).unwrap();
        assert_eq!(from, HomesteadSigner.sender(&signed).unwrap());
        assert_eq!(from, address("a94f5374fce5edbc8e2a8697c15331677e6ebf0b"));
    }
}
