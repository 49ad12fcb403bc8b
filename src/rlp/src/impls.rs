use common::{trim_leading_zeros, u256_to_be_bytes, H160, H256, H512, U256};
use crate::error::Error;
use crate::rlpin::Rlp;
use crate::traits::{Decodable, Encodable};
use crate::RLPStream;

impl Encodable for str {
    fn encode(&self, stream: &mut RLPStream) {
        stream.write_iter(self.bytes())
    }
}

impl Encodable for [u8] {
    fn encode(&self, stream: &mut RLPStream) {
        stream.write_iter(self.iter().cloned())
    }
}

impl Encodable for Vec<u8> {
    fn encode(&self, stream: &mut RLPStream) {
        stream.write_iter(self.iter().cloned())
    }
}

impl Decodable for Vec<u8> {
    fn decode(rlp: &Rlp) -> Result<Self, Error> {
        rlp.data().map(|d| d.to_vec())
    }
}

macro_rules! impl_for_hash {
    ($name: ident, $len: expr) => {
        impl Encodable for $name {
            fn encode(&self, stream: &mut RLPStream) {
                stream.write_iter(self.as_bytes().iter().cloned())
            }
        }

        impl Decodable for $name {
            fn decode(rlp: &Rlp) -> Result<Self, Error> {
                let data = rlp.data()?;
                if data.len() < $len {
                    Err(Error::RlpIsTooShort)
                } else if data.len() > $len {
                    Err(Error::RlpIsTooBig)
                } else {
                    Ok($name::from_slice(data))
                }
            }
        }
    };
}

impl_for_hash!(H160, 20);
impl_for_hash!(H256, 32);
impl_for_hash!(H512, 64);

/// Integer payloads must be minimal: no leading zero byte, and zero is the empty string.
fn integer_payload<'a>(rlp: &Rlp<'a>, max_len: usize) -> Result<&'a [u8], Error> {
    let bytes = rlp.data()?;
    if bytes.len() > max_len {
        return Err(Error::RlpIsTooBig);
    }
    if bytes.first() == Some(&0) {
        return Err(Error::RlpInvalidIndirection);
    }
    Ok(bytes)
}

macro_rules! impl_for_u {
    ($name: ident) => {
        impl Encodable for $name {
            fn encode(&self, s: &mut RLPStream) {
                let leading_empty_bytes = self.leading_zeros() as usize / 8;
                let buffer = self.to_be_bytes();
                s.write_iter(buffer[leading_empty_bytes..].iter().cloned());
            }
        }

        impl Decodable for $name {
            fn decode(rlp: &Rlp) -> Result<Self, Error> {
                const SIZE: usize = std::mem::size_of::<$name>();
                let bytes = integer_payload(rlp, SIZE)?;
                let mut buffer = [0u8; SIZE];
                buffer[SIZE - bytes.len()..].copy_from_slice(bytes);
                Ok($name::from_be_bytes(buffer))
            }
        }
    };
}

impl_for_u!(u8);
impl_for_u!(u16);
impl_for_u!(u32);
impl_for_u!(u64);

impl Encodable for U256 {
    fn encode(&self, stream: &mut RLPStream) {
        let buffer = u256_to_be_bytes(self);
        stream.write_iter(trim_leading_zeros(&buffer).iter().cloned())
    }
}

impl Decodable for U256 {
    fn decode(rlp: &Rlp) -> Result<Self, Error> {
        let bytes = integer_payload(rlp, 32)?;
        Ok(U256::from_big_endian(bytes))
    }
}

#[cfg(test)]
mod tests {
    use common::{H160, U256};
    use crate::{decode, encode, Error, RLPStream};

    #[test]
    fn random_works() {
        let mut r = RLPStream::new();
        r.append(&u64::MAX);
        assert_eq!(r.out(), vec![136, 255, 255, 255, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn integers_are_minimal() {
        assert_eq!(encode(&0u64), vec![0x80]);
        assert_eq!(encode(&15u64), vec![0x0f]);
        assert_eq!(encode(&1024u64), vec![0x82, 0x04, 0x00]);
        assert_eq!(encode(&U256::zero()), vec![0x80]);
        assert_eq!(encode(&U256::from(0x400)), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn integers_decode() {
        assert_eq!(decode::<u64>(&[0x80]).unwrap(), 0);
        assert_eq!(decode::<u64>(&[0x82, 0x04, 0x00]).unwrap(), 1024);
        assert_eq!(decode::<U256>(&[0x82, 0x04, 0x00]).unwrap(), U256::from(1024));
    }

    #[test]
    fn integer_with_leading_zero_fails() {
        assert_eq!(decode::<u64>(&[0x82, 0x00, 0x04]).unwrap_err(), Error::RlpInvalidIndirection);
        assert_eq!(decode::<U256>(&[0x81, 0x00]).unwrap_err(), Error::RlpInvalidIndirection);
        assert_eq!(decode::<u64>(&[0x00]).unwrap_err(), Error::RlpInvalidIndirection);
    }

    #[test]
    fn integer_too_wide_fails() {
        let mut data = vec![0x89];
        data.extend(std::iter::repeat(0xffu8).take(9));
        assert_eq!(decode::<u64>(&data).unwrap_err(), Error::RlpIsTooBig);
        assert!(decode::<U256>(&data).is_ok());
    }

    #[test]
    fn address_needs_exact_length() {
        let address = H160::repeat_byte(0x11);
        let encoded = encode(&address);
        assert_eq!(encoded.len(), 21);
        assert_eq!(decode::<H160>(&encoded).unwrap(), address);
        assert_eq!(decode::<H160>(&encode(&vec![0x11u8; 19])).unwrap_err(), Error::RlpIsTooShort);
    }

    #[test]
    fn bytes_match_known_vector() {
        let encoded = encode(&hex::decode("5544").unwrap());
        assert_eq!(encoded, vec![0x82, 0x55, 0x44]);
    }
}
