use common::Address;
use rlp::{Decodable, Encodable, Error, RLPStream, Rlp};

use crate::transaction::{SignatureHashType, Transaction, TxData, TxMeta};

/// nonce, gas price, gas, to, value, data, v, r, s
pub const CORE_FIELDS: usize = 9;
/// l1 message sender, l1 rollup tx id, signature hash type
pub const EXTENSION_FIELDS: usize = 3;

impl Transaction {
    /// Appends the six fields every signing digest starts with.
    pub(crate) fn rlp_append_unsigned(&self, stream: &mut RLPStream) {
        let data = &self.data;
        stream.append(&data.nonce).append(&data.gas_price).append(&data.gas_limit);
        match &data.to {
            Some(to) => stream.append(to),
            None => stream.append_empty_data(),
        };
        stream.append(&data.value).append(&data.data);
    }

    /// The nine core fields, the preimage of the transaction hash.
    pub(crate) fn core_rlp(&self) -> Vec<u8> {
        let mut stream = RLPStream::new_list(CORE_FIELDS);
        self.rlp_append_unsigned(&mut stream);
        stream.append(&self.data.v).append(&self.data.r).append(&self.data.s);
        stream.out()
    }
}

impl TxMeta {
    /// Extension slots written: up to and including the last present field.
    fn trailing_slots(&self) -> usize {
        if self.signature_hash_type.is_some() {
            3
        } else if self.l1_rollup_tx_id.is_some() {
            2
        } else if self.l1_message_sender.is_some() {
            1
        } else {
            0
        }
    }
}

/// An absent field followed by a present one is written as the empty list.
fn append_optional<E: Encodable>(stream: &mut RLPStream, value: Option<&E>) {
    match value {
        Some(value) => stream.append(value),
        None => stream.begin_list(0),
    };
}

impl Encodable for Transaction {
    fn encode(&self, stream: &mut RLPStream) {
        let trailing = self.meta.trailing_slots();
        stream.begin_list(CORE_FIELDS + trailing);
        self.rlp_append_unsigned(stream);
        stream.append(&self.data.v).append(&self.data.r).append(&self.data.s);

        let hash_type = self.meta.signature_hash_type.map(|t| t.code());
        if trailing > 0 {
            append_optional(stream, self.meta.l1_message_sender.as_ref());
        }
        if trailing > 1 {
            append_optional(stream, self.meta.l1_rollup_tx_id.as_ref());
        }
        if trailing > 2 {
            append_optional(stream, hash_type.as_ref());
        }
    }
}

fn decode_to(rlp: &Rlp) -> Result<Option<Address>, Error> {
    if rlp.is_empty() && rlp.is_data() {
        return Ok(None);
    }
    rlp.as_val().map(Some)
}

/// Reads extension slot `index`, `None` when it is absent.
fn extension_slot<'a>(rlp: &Rlp<'a>, index: usize, trailing: usize) -> Result<Option<Rlp<'a>>, Error> {
    if index >= trailing {
        return Ok(None);
    }
    let item = rlp.at(CORE_FIELDS + index)?;
    if !item.is_list() {
        return Ok(Some(item));
    }
    if item.item_count()? != 0 {
        return Err(Error::Custom("extension field must be a value or the empty list"));
    }
    if index + 1 == trailing {
        return Err(Error::Custom("trailing absent extension field"));
    }
    Ok(None)
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp) -> Result<Self, Error> {
        if !rlp.is_list() {
            return Err(Error::RlpExpectedToBeList);
        }
        let count = rlp.item_count()?;
        if !(CORE_FIELDS..=CORE_FIELDS + EXTENSION_FIELDS).contains(&count) {
            return Err(Error::RlpIncorrectListLen);
        }

        let data = TxData {
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas_limit: rlp.val_at(2)?,
            to: decode_to(&rlp.at(3)?)?,
            value: rlp.val_at(4)?,
            data: rlp.val_at(5)?,
            v: rlp.val_at(6)?,
            r: rlp.val_at(7)?,
            s: rlp.val_at(8)?,
        };

        let trailing = count - CORE_FIELDS;
        let signature_hash_type = match extension_slot(rlp, 2, trailing)? {
            Some(item) => Some(
                SignatureHashType::from_code(item.as_val()?)
                    .ok_or(Error::Custom("unknown signature hash type"))?,
            ),
            None => None,
        };
        let meta = TxMeta {
            l1_message_sender: extension_slot(rlp, 0, trailing)?.map(|i| i.as_val()).transpose()?,
            l1_rollup_tx_id: extension_slot(rlp, 1, trailing)?.map(|i| i.as_val()).transpose()?,
            signature_hash_type,
        };

        Ok(Transaction::from_parts(data, meta))
    }
}
