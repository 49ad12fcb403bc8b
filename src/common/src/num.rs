use crate::U256;

pub const U256_LEN: usize = 32;

/// Big endian bytes of a `U256`, always 32 bytes long.
pub fn u256_to_be_bytes(value: &U256) -> [u8; U256_LEN] {
    let mut out = [0u8; U256_LEN];
    value.to_big_endian(&mut out);
    out
}

/// Writes `value` big endian into exactly `width` bytes, left padded with zeros.
/// Returns `None` if the value needs more than `width` bytes.
pub fn to_fixed_be(value: &U256, width: usize) -> Option<Vec<u8>> {
    let needed = (value.bits() + 7) / 8;
    if needed > width {
        return None;
    }
    let full = u256_to_be_bytes(value);
    let mut out = vec![0u8; width];
    out[width - needed..].copy_from_slice(&full[U256_LEN - needed..]);
    Some(out)
}

/// Strips the leading zero bytes, the minimal big endian form of an integer.
pub fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

#[cfg(test)]
mod tests {
    use crate::{to_fixed_be, trim_leading_zeros, u256_to_be_bytes, U256};

    #[test]
    fn to_fixed_be_pads() {
        assert_eq!(to_fixed_be(&U256::from(0x0102), 3), Some(vec![0, 1, 2]));
        assert_eq!(to_fixed_be(&U256::zero(), 2), Some(vec![0, 0]));
        assert_eq!(to_fixed_be(&U256::from(0xff), 1), Some(vec![0xff]));
    }

    #[test]
    fn to_fixed_be_rejects_overflow() {
        assert_eq!(to_fixed_be(&U256::from(0x100), 1), None);
        assert_eq!(to_fixed_be(&U256::from(u32::MAX as u64 + 1), 4), None);
    }

    #[test]
    fn trim_works() {
        assert_eq!(trim_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert!(trim_leading_zeros(&[0, 0]).is_empty());
        assert_eq!(trim_leading_zeros(&u256_to_be_bytes(&U256::from(1000))), &[0x03, 0xe8]);
    }
}
