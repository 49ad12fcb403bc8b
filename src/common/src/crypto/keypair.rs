//! Secret key implementation.

use std::str::FromStr;
use secp256k1::{Message, PublicKey, SecretKey};
// Why do we need this? http://www.daemonology.net/blog/2014-09-04-how-to-zero-a-buffer.html
use zeroize::Zeroize;
use crate::crypto::recovery::{public_to_address, SIGNATURE_LENGTH};
use crate::crypto::SECP256K1;
use crate::error::Error;
use crate::{Address, H256, H512};

pub type Public = H512;

#[derive(Debug, PartialEq, Clone)]
pub struct KeyPair {
    secret: Secret,
    public: Public,
}

impl KeyPair {
    pub fn random() -> Self {
        let (secret_key, _) = SECP256K1.generate_keypair(&mut secp256k1::rand::thread_rng());
        Self::from_secret_key(secret_key)
    }

    pub fn from_secret_key(secret_key: SecretKey) -> Self {
        let public_key = PublicKey::from_secret_key(&*SECP256K1, &secret_key);
        let serialized = public_key.serialize_uncompressed();
        Self { secret: Secret::from(secret_key), public: Public::from_slice(&serialized[1..65]) }
    }

    pub fn from_secret(secret: Secret) -> Result<Self, Error> {
        let secret_key = secret.to_secp256k1_secret()?;
        Ok(Self::from_secret_key(secret_key))
    }

    pub fn public(&self) -> &Public {
        &self.public
    }

    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    /// The account address controlled by this key pair.
    pub fn address(&self) -> Address {
        public_to_address(&self.public)
    }
}

/// Represents secret key
#[derive(Debug, PartialEq, Clone)]
pub struct Secret {
    inner: H256,
}

impl Drop for Secret {
    fn drop(&mut self) {
        self.inner.as_bytes_mut().zeroize()
    }
}

impl Secret {
    /// Creates a `Secret` from the hex big endian representation of the secret.
    pub fn copy_from_str(s: &str) -> Result<Self, Error> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        Ok(Secret { inner: H256::from_str(s)? })
    }

    /// Create a `secp256k1::SecretKey` based on this secret.
    /// Warning the resulting secret key need to be zeroized manually.
    pub fn to_secp256k1_secret(&self) -> Result<SecretKey, Error> {
        SecretKey::from_slice(self.inner.as_bytes()).map_err(Into::into)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl From<[u8; 32]> for Secret {
    #[inline(always)]
    fn from(mut k: [u8; 32]) -> Self {
        let result = Secret { inner: H256::from_slice(&k) };
        k.zeroize();
        result
    }
}

impl From<SecretKey> for Secret {
    #[inline(always)]
    fn from(key: SecretKey) -> Self {
        key.secret_bytes().into()
    }
}

/// Signs message with the given secret key.
/// Returns the signature as `r || s || recovery id`.
pub fn sign(secret: &Secret, message: &H256) -> Result<[u8; SIGNATURE_LENGTH], Error> {
    let sec = secret.to_secp256k1_secret()?;
    let s = SECP256K1.sign_ecdsa_recoverable(&Message::from_digest_slice(message.as_bytes())?, &sec);
    let (rec_id, data) = s.serialize_compact();
    let mut data_arr = [0; SIGNATURE_LENGTH];

    // no need to check if s is low, it always is
    data_arr[0..64].copy_from_slice(&data[0..64]);
    data_arr[64] = rec_id.to_i32() as u8;
    Ok(data_arr)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use crate::{recover, sign, Address, KeyPair, Secret, H256};

    #[test]
    fn test_sign() {
        // Just some random values for secret/public to check we agree with previous implementation.
        let secret =
            Secret::copy_from_str("b71c71a67e1177ad4e901695e1b4b9ee17ae16c6668d313eac2f96dbcda3f291").unwrap();
        let message = H256::from_low_u64_be(1);
        let s = sign(&secret, &message).unwrap();
        assert_eq!(s, [182, 182, 244, 193, 65, 89, 128, 178, 40, 121, 127, 32, 179, 105, 30, 133, 208, 112, 255, 162, 45, 171, 138, 47, 71, 75, 182, 177, 36, 223, 7, 174, 101, 191, 217, 45, 254, 26, 10, 67, 76, 22, 29, 43, 57, 71, 4, 67, 127, 138, 165, 169, 203, 93, 61, 18, 76, 208, 229, 96, 14, 85, 252, 29, 0]);
    }

    #[test]
    fn test_address() {
        let secret =
            Secret::copy_from_str("45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8").unwrap();
        let key_pair = KeyPair::from_secret(secret).unwrap();
        assert_eq!(
            key_pair.address(),
            Address::from_str("a94f5374fce5edbc8e2a8697c15331677e6ebf0b").unwrap()
        );
    }

    #[test]
    fn sign_then_recover() {
        let key_pair = KeyPair::random();
        let message = H256::repeat_byte(0x42);
        let signature = sign(key_pair.secret(), &message).unwrap();
        assert_eq!(&recover(&signature, &message).unwrap(), key_pair.public());
    }
}
