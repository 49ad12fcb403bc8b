use alloy_primitives::U256 as AbiU256;
use alloy_sol_types::SolCall;
use common::{to_fixed_be, u256_to_be_bytes, Address, U256};
use log::debug;
use transaction::{Message, QueueOrigin, SignatureHashType, Signer, Transaction};

use crate::abi::{kallCall, runCall, to_abi_address, to_abi_u256, OvmTransaction};
use crate::{EncodingError, Error, ExecutionContext, OvmConfig};

/// The signature scheme tag the decompressor dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    /// Only the transaction hash follows the signature
    EoaCreate = 0,
    Eip155 = 1,
    EthSign = 2,
}

pub fn get_signature_type(hash_type: Option<SignatureHashType>) -> SignatureType {
    match hash_type {
        None => SignatureType::EoaCreate,
        Some(SignatureHashType::Eip155) => SignatureType::Eip155,
        Some(SignatureHashType::EthSign) => SignatureType::EthSign,
    }
}

pub fn get_queue_origin(code: &U256) -> Result<QueueOrigin, Error> {
    QueueOrigin::from_code(code).ok_or(Error::InvalidQueueOrigin(*code))
}

/// Big-endian `value` in exactly `width` bytes.
fn fixed(value: &U256, width: usize, field: &'static str) -> Result<Vec<u8>, EncodingError> {
    to_fixed_be(value, width).ok_or(EncodingError::FieldOverflow { field, width })
}

/// Copies `msg` with a new sender, recipient and calldata. Nonce checking is
/// turned off and the queue origin revalidated.
fn mod_message(msg: &Message, from: Address, to: Option<Address>, data: Vec<u8>) -> Result<Message, Error> {
    let queue_origin = get_queue_origin(&msg.queue_origin)?;
    Ok(Message {
        from,
        to,
        nonce: msg.nonce,
        value: msg.value,
        gas: msg.gas,
        gas_price: msg.gas_price,
        data,
        check_nonce: false,
        l1_message_sender: msg.l1_message_sender,
        l1_rollup_tx_id: msg.l1_rollup_tx_id,
        queue_origin: queue_origin.code(),
        signature_hash_type: msg.signature_hash_type,
    })
}

/// Rewrites messages into calls on the configured OVM contracts.
#[derive(Debug, Clone)]
pub struct OvmTranscoder {
    config: OvmConfig,
}

impl OvmTranscoder {
    pub fn new(config: OvmConfig) -> Self {
        OvmTranscoder { config }
    }

    pub fn config(&self) -> &OvmConfig {
        &self.config
    }

    /// Turns `tx` into a call on the sequencer message decompressor, sent from
    /// the privileged sender. Transactions already sent by the privileged
    /// sender are returned as plain messages.
    ///
    /// The calldata is `[type:1][v:1][r:32][s:32]` followed by the signing
    /// hash for [`SignatureType::EoaCreate`], otherwise by
    /// `[nonce:2][gas:3][gas price:1][chain id:4][to:20][data]`.
    pub fn as_ovm_message(&self, tx: &Transaction, signer: &dyn Signer) -> Result<Message, Error> {
        let msg = tx.as_message(signer)?;
        if msg.from == self.config.privileged_sender {
            debug!("privileged sender {:?}, skip transcoding {:?}", msg.from, tx.hash());
            return Ok(msg);
        }

        let (v, r, s) = tx.raw_signature_values();
        let sig_type = get_signature_type(msg.signature_hash_type);

        let mut data = Vec::with_capacity(66 + 30 + msg.data.len());
        data.push(sig_type as u8);
        data.push(v.low_u64() as u8);
        data.extend_from_slice(&u256_to_be_bytes(&r));
        data.extend_from_slice(&u256_to_be_bytes(&s));

        match sig_type {
            SignatureType::EoaCreate => data.extend_from_slice(signer.hash(tx).as_bytes()),
            SignatureType::Eip155 | SignatureType::EthSign => {
                data.extend(fixed(&U256::from(msg.nonce), 2, "nonce")?);
                data.extend(fixed(&U256::from(msg.gas), 3, "gas limit")?);
                data.extend(fixed(&msg.gas_price, 1, "gas price")?);
                data.extend(fixed(&tx.chain_id(), 4, "chain id")?);
                data.extend_from_slice(tx.to().unwrap_or_default().as_bytes());
                data.extend_from_slice(&msg.data);
            }
        }

        mod_message(&msg, self.config.privileged_sender, Some(self.config.decompressor), data)
    }

    /// Wraps `msg` into `run(transaction, stateManager)` on the execution
    /// manager. The sender is kept.
    pub fn to_execution_manager_run(&self, msg: &Message, context: &ExecutionContext) -> Result<Message, Error> {
        let entrypoint = msg.to.ok_or(EncodingError::MissingEntrypoint)?;
        let queue_origin = get_queue_origin(&msg.queue_origin)?;

        let call = runCall {
            _transaction: OvmTransaction {
                timestamp: to_abi_u256(&context.timestamp),
                blockNumber: to_abi_u256(&context.block_number),
                l1QueueOrigin: queue_origin as u8,
                l1TxOrigin: to_abi_address(&msg.l1_message_sender.unwrap_or_default()),
                entrypoint: to_abi_address(&entrypoint),
                gasLimit: AbiU256::from(msg.gas),
                data: msg.data.clone().into(),
            },
            _ovmStateManager: to_abi_address(&self.config.state_manager),
        };

        mod_message(msg, msg.from, Some(self.config.execution_manager), call.abi_encode())
    }
}

/// Wraps `msg` into `kall(gas, to, data)` on the sender's own contract account.
pub fn encode_fake_message(msg: &Message) -> Result<Message, Error> {
    let to = msg.to.ok_or(EncodingError::MissingEntrypoint)?;
    let call = kallCall {
        _gasLimit: AbiU256::from(msg.gas),
        _to: to_abi_address(&to),
        _data: msg.data.clone().into(),
    };
    mod_message(msg, msg.from, Some(msg.from), call.abi_encode())
}
