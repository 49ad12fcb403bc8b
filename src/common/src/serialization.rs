//! Hex serde representations: `0x` prefixed data for hashes and byte strings,
//! minimal `0x` prefixed quantities for integers.

use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use crate::{H160, H256, H512, U256};

macro_rules! impl_serde_for_hash {
    ($name: ident, $len: expr) => {
        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&format!("0x{}", hex::encode(self.as_bytes())))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                let bytes = crate::from_hex(&s)
                    .map_err(|_| D::Error::custom(format!("invalid hex value {}", s)))?;
                if bytes.len() != $len {
                    return Err(D::Error::invalid_length(bytes.len(), &stringify!($len)));
                }
                Ok($name::from_slice(&bytes))
            }
        }
    };
}

impl_serde_for_hash!(H160, 20);
impl_serde_for_hash!(H256, 32);
impl_serde_for_hash!(H512, 64);

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", self))
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuantityVisitor)
    }
}

struct QuantityVisitor;

impl<'a> Visitor<'a> for QuantityVisitor {
    type Value = U256;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a hex encoded or decimal quantity")
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: Error,
    {
        Ok(U256::from(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: Error,
    {
        match value.strip_prefix("0x") {
            Some("") => Err(Error::custom("empty hex quantity")),
            Some(digits) => {
                if digits.len() > 1 && digits.starts_with('0') {
                    return Err(Error::custom(format!("hex quantity {} has leading zeros", value)));
                }
                U256::from_str_radix(digits, 16)
                    .map_err(|e| Error::custom(format!("invalid hex value {}: {:?}", value, e)))
            }
            None => U256::from_dec_str(value)
                .map_err(|e| Error::custom(format!("invalid decimal value {}: {:?}", value, e))),
        }
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
    where
        E: Error,
    {
        self.visit_str(value.as_ref())
    }
}

/// `#[serde(with = "common::serialization::quantity")]` for `u64` fields.
pub mod quantity {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use crate::U256;

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{:#x}", value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = U256::deserialize(deserializer)?;
        if value.bits() > 64 {
            return Err(D::Error::custom(format!("quantity {} overflows u64", value)));
        }
        Ok(value.low_u64())
    }
}

/// `#[serde(with = "common::serialization::opt_quantity")]` for `Option<u64>` fields.
pub mod opt_quantity {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::quantity::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::quantity")] u64);

        let value: Option<Wrapper> = Option::deserialize(deserializer)?;
        Ok(value.map(|Wrapper(v)| v))
    }
}

/// `#[serde(with = "common::serialization::bytes")]` for `Vec<u8>` fields.
pub mod bytes {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(value)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        crate::from_hex(&s).map_err(|_| D::Error::custom(format!("invalid hex data {}", s)))
    }
}
