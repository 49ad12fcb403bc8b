use common::serialization::{bytes, opt_quantity, quantity};
use common::{Address, H256, U256};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::transaction::{SignatureHashType, Transaction, TxData, TxMeta};
use crate::Error;

/// The JSON-RPC shape of a transaction.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionJson {
    #[serde(with = "quantity")]
    nonce: u64,
    gas_price: U256,
    #[serde(with = "quantity")]
    gas: u64,
    to: Option<Address>,
    value: U256,
    #[serde(with = "bytes")]
    input: Vec<u8>,
    v: U256,
    r: U256,
    s: U256,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<H256>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    l1_message_sender: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "opt_quantity")]
    l1_rollup_tx_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    signature_hash_type: Option<SignatureHashType>,
}

impl Transaction {
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses the JSON-RPC form. A `hash` field, when given, must match.
    pub fn from_json(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }
}

impl Serialize for Transaction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (v, r, s) = self.raw_signature_values();
        TransactionJson {
            nonce: self.nonce(),
            gas_price: self.gas_price(),
            gas: self.gas(),
            to: self.to(),
            value: self.value(),
            input: self.data().to_vec(),
            v,
            r,
            s,
            hash: Some(self.hash()),
            l1_message_sender: self.meta.l1_message_sender,
            l1_rollup_tx_id: self.meta.l1_rollup_tx_id,
            signature_hash_type: self.meta.signature_hash_type,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = TransactionJson::deserialize(deserializer)?;
        let tx = Transaction::from_parts(
            TxData {
                nonce: json.nonce,
                gas_price: json.gas_price,
                gas_limit: json.gas,
                to: json.to,
                value: json.value,
                data: json.input,
                v: json.v,
                r: json.r,
                s: json.s,
            },
            TxMeta {
                l1_message_sender: json.l1_message_sender,
                l1_rollup_tx_id: json.l1_rollup_tx_id,
                signature_hash_type: json.signature_hash_type,
            },
        );
        if let Some(hash) = json.hash {
            if hash != tx.hash() {
                return Err(de::Error::custom(format!(
                    "hash mismatch: given {:?}, computed {:?}",
                    hash,
                    tx.hash()
                )));
            }
        }
        Ok(tx)
    }
}
