use common::serialization::{bytes, opt_quantity, quantity};
use common::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::{Error, SignatureHashType, Signer, Transaction};

/// The queue a rollup transaction entered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueOrigin {
    /// Submitted directly to the sequencer
    Sequencer = 0,
    /// Enqueued on L1 and relayed
    L1ToL2 = 1,
}

impl QueueOrigin {
    pub fn code(&self) -> U256 {
        match self {
            QueueOrigin::Sequencer => U256::zero(),
            QueueOrigin::L1ToL2 => U256::one(),
        }
    }

    pub fn from_code(code: &U256) -> Option<Self> {
        if code.is_zero() {
            Some(QueueOrigin::Sequencer)
        } else if *code == U256::one() {
            Some(QueueOrigin::L1ToL2)
        } else {
            None
        }
    }

    /// Transactions with an L1 rollup id were relayed from L1.
    pub fn of(tx: &Transaction) -> Self {
        match tx.l1_rollup_tx_id() {
            Some(_) => QueueOrigin::L1ToL2,
            None => QueueOrigin::Sequencer,
        }
    }
}

/// A transaction reduced to what execution needs, with the sender resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub from: Address,
    pub to: Option<Address>,
    #[serde(with = "quantity")]
    pub nonce: u64,
    pub value: U256,
    #[serde(with = "quantity")]
    pub gas: u64,
    pub gas_price: U256,
    #[serde(with = "bytes")]
    pub data: Vec<u8>,
    pub check_nonce: bool,
    pub l1_message_sender: Option<Address>,
    #[serde(default, with = "opt_quantity")]
    pub l1_rollup_tx_id: Option<u64>,
    /// The numeric queue origin, kept raw so it can be revalidated
    pub queue_origin: U256,
    pub signature_hash_type: Option<SignatureHashType>,
}

impl Transaction {
    /// The execution message of this transaction, with its sender recovered
    /// through `signer`.
    pub fn as_message(&self, signer: &dyn Signer) -> Result<Message, Error> {
        let from = self.sender(signer)?;
        Ok(Message {
            from,
            to: self.to(),
            nonce: self.nonce(),
            value: self.value(),
            gas: self.gas(),
            gas_price: self.gas_price(),
            data: self.data().to_vec(),
            check_nonce: true,
            l1_message_sender: self.l1_message_sender(),
            l1_rollup_tx_id: self.l1_rollup_tx_id(),
            queue_origin: QueueOrigin::of(self).code(),
            signature_hash_type: self.signature_hash_type(),
        })
    }
}

#[cfg(test)]
mod tests {
    use common::{Address, KeyPair, U256};

    use crate::{sign_tx, Eip155Signer, QueueOrigin, Transaction};

    #[test]
    fn queue_origin_codes_work() {
        assert_eq!(QueueOrigin::from_code(&U256::zero()), Some(QueueOrigin::Sequencer));
        assert_eq!(QueueOrigin::from_code(&U256::one()), Some(QueueOrigin::L1ToL2));
        assert_eq!(QueueOrigin::from_code(&U256::from(2)), None);
        assert_eq!(QueueOrigin::L1ToL2.code(), U256::one());
    }

    #[test]
    fn as_message_works() {
        let pair = KeyPair::random();
        let signer = Eip155Signer::new(420);
        let tx = Transaction::new(7, Address::repeat_byte(2), U256::from(5), 100, U256::from(3), vec![1, 2]);
        let signed = sign_tx(&tx, &signer, pair.secret()).unwrap();

        let message = signed.as_message(&signer).unwrap();
        assert_eq!(message.from, pair.address());
        assert_eq!(message.to, Some(Address::repeat_byte(2)));
        assert_eq!(message.nonce, 7);
        assert_eq!(message.gas, 100);
        assert_eq!(message.gas_price, U256::from(3));
        assert_eq!(message.data, vec![1, 2]);
        assert!(message.check_nonce);
        assert_eq!(message.queue_origin, QueueOrigin::Sequencer.code());

        let relayed = sign_tx(&tx.with_l1_rollup_tx_id(1), &signer, pair.secret()).unwrap();
        let message = relayed.as_message(&signer).unwrap();
        assert_eq!(message.queue_origin, QueueOrigin::L1ToL2.code());
        assert_eq!(message.l1_rollup_tx_id, Some(1));
    }

    #[test]
    fn as_message_needs_valid_signature() {
        let tx = Transaction::new(0, Address::zero(), U256::zero(), 0, U256::zero(), vec![]);
        assert!(tx.as_message(&Eip155Signer::new(1)).is_err());
    }
}
