use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::Message;
use crate::crypto::keypair::Public;
use crate::crypto::SECP256K1;
use crate::error::Error;
use crate::{keccak, Address, H256};

/// `r || s || recovery id`
pub const SIGNATURE_LENGTH: usize = 65;

/// Recovers the public key from the signature for the message
pub fn recover(signature: &[u8; SIGNATURE_LENGTH], message: &H256) -> Result<Public, Error> {
    let rsig = RecoverableSignature::from_compact(
        &signature[0..64],
        RecoveryId::from_i32(signature[64] as i32)?,
    )?;

    let pubkey = SECP256K1.recover_ecdsa(&Message::from_digest_slice(message.as_bytes())?, &rsig)?;
    let serialized = pubkey.serialize_uncompressed();

    Ok(Public::from_slice(&serialized[1..65]))
}

/// The address is the low 20 bytes of the keccak hash of the public key.
pub fn public_to_address(public: &Public) -> Address {
    keccak(public.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use crate::{recover, H256};

    #[test]
    fn recover_rejects_bad_recovery_id() {
        let mut signature = [1u8; 65];
        signature[64] = 4;
        assert!(recover(&signature, &H256::repeat_byte(1)).is_err());
    }

    #[test]
    fn recover_rejects_zero_signature() {
        let signature = [0u8; 65];
        assert!(recover(&signature, &H256::repeat_byte(1)).is_err());
    }
}
