use crate::error::Error;
use crate::traits::Decodable;
use crate::{LEN_CUTOFF, LIST_OFFSET, STR_OFFSET};

/// Header and payload sizes of a single item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadInfo {
    /// Header length in bytes
    pub header_len: usize,
    /// Value length in bytes
    pub value_len: usize,
    /// Whether the item is a list
    pub is_list: bool,
}

impl PayloadInfo {
    /// Total size of the item, header included.
    pub fn total(&self) -> usize {
        self.header_len + self.value_len
    }
}

/// Reads the big endian length following a long form prefix.
fn decode_long_length(bytes: &[u8], len_of_len: usize, zero_prefix: Error) -> Result<usize, Error> {
    let len_bytes = bytes.get(1..1 + len_of_len).ok_or(Error::RlpIsTooShort)?;
    if len_bytes[0] == 0 {
        return Err(zero_prefix);
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(Error::RlpInvalidLength);
    }
    let len = len_bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
    if len <= LEN_CUTOFF as usize {
        return Err(Error::RlpInvalidIndirection);
    }
    Ok(len)
}

fn payload_info(bytes: &[u8]) -> Result<PayloadInfo, Error> {
    let prefix = *bytes.first().ok_or(Error::RlpIsTooShort)?;
    let info = match prefix {
        0..=0x7f => PayloadInfo { header_len: 0, value_len: 1, is_list: false },
        0x80..=0xb7 => {
            let value_len = (prefix - STR_OFFSET) as usize;
            // a single byte below 0x80 must be encoded as itself
            if value_len == 1 && bytes.get(1).map_or(false, |b| *b < STR_OFFSET) {
                return Err(Error::RlpInvalidIndirection);
            }
            PayloadInfo { header_len: 1, value_len, is_list: false }
        }
        0xb8..=0xbf => {
            let len_of_len = (prefix - STR_OFFSET - LEN_CUTOFF) as usize;
            let value_len = decode_long_length(bytes, len_of_len, Error::RlpDataLenWithZeroPrefix)?;
            PayloadInfo { header_len: 1 + len_of_len, value_len, is_list: false }
        }
        0xc0..=0xf7 => PayloadInfo { header_len: 1, value_len: (prefix - LIST_OFFSET) as usize, is_list: true },
        _ => {
            let len_of_len = (prefix - LIST_OFFSET - LEN_CUTOFF) as usize;
            let value_len = decode_long_length(bytes, len_of_len, Error::RlpListLenWithZeroPrefix)?;
            PayloadInfo { header_len: 1 + len_of_len, value_len, is_list: true }
        }
    };
    let total = info.header_len.checked_add(info.value_len).ok_or(Error::RlpInvalidLength)?;
    if total > bytes.len() {
        return Err(Error::RlpIsTooShort);
    }
    Ok(info)
}

/// Zero-copy view over a single RLP item.
#[derive(Debug, Clone, Copy)]
pub struct Rlp<'a> {
    bytes: &'a [u8],
}

impl<'a> Rlp<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Rlp { bytes }
    }

    pub fn payload_info(&self) -> Result<PayloadInfo, Error> {
        payload_info(self.bytes)
    }

    pub fn is_list(&self) -> bool {
        matches!(self.bytes.first(), Some(b) if *b >= LIST_OFFSET)
    }

    pub fn is_data(&self) -> bool {
        matches!(self.bytes.first(), Some(b) if *b < LIST_OFFSET)
    }

    /// The empty byte string or the empty list.
    pub fn is_empty(&self) -> bool {
        matches!(self.bytes.first(), Some(&STR_OFFSET) | Some(&LIST_OFFSET))
    }

    /// The payload of a byte string item.
    pub fn data(&self) -> Result<&'a [u8], Error> {
        let info = self.payload_info()?;
        if info.is_list {
            return Err(Error::RlpExpectedToBeData);
        }
        Ok(&self.bytes[info.header_len..info.total()])
    }

    /// The payload of a list item.
    fn list_payload(&self) -> Result<&'a [u8], Error> {
        let info = self.payload_info()?;
        if !info.is_list {
            return Err(Error::RlpExpectedToBeList);
        }
        Ok(&self.bytes[info.header_len..info.total()])
    }

    pub fn item_count(&self) -> Result<usize, Error> {
        self.iter()?.try_fold(0, |count, item| item.map(|_| count + 1))
    }

    pub fn at(&self, index: usize) -> Result<Rlp<'a>, Error> {
        self.iter()?.nth(index).ok_or(Error::RlpIsTooShort)?
    }

    pub fn as_val<T: Decodable>(&self) -> Result<T, Error> {
        T::decode(self)
    }

    pub fn val_at<T: Decodable>(&self, index: usize) -> Result<T, Error> {
        self.at(index)?.as_val()
    }

    /// Iterates the items of a list. Each item is bounded by its own header,
    /// and an item overrunning the list payload is an error.
    pub fn iter(&self) -> Result<RlpIterator<'a>, Error> {
        Ok(RlpIterator { remaining: self.list_payload()? })
    }
}

pub struct RlpIterator<'a> {
    remaining: &'a [u8],
}

impl<'a> Iterator for RlpIterator<'a> {
    type Item = Result<Rlp<'a>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        match payload_info(self.remaining) {
            Ok(info) => {
                let (item, rest) = self.remaining.split_at(info.total());
                self.remaining = rest;
                Some(Ok(Rlp::new(item)))
            }
            Err(Error::RlpIsTooShort) => {
                self.remaining = &[];
                Some(Err(Error::RlpInconsistentLengthAndData))
            }
            Err(e) => {
                self.remaining = &[];
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{decode, Error, Rlp};

    #[test]
    fn list_items_are_visited() {
        let data = vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g'];
        let rlp = Rlp::new(&data);
        assert!(rlp.is_list());
        assert_eq!(rlp.item_count().unwrap(), 2);
        assert_eq!(rlp.at(0).unwrap().data().unwrap(), b"cat");
        assert_eq!(rlp.at(1).unwrap().data().unwrap(), b"dog");
        assert_eq!(rlp.at(2).unwrap_err(), Error::RlpIsTooShort);
    }

    #[test]
    fn truncated_input_fails() {
        let data = vec![0x83, b'c', b'a'];
        assert_eq!(Rlp::new(&data).data().unwrap_err(), Error::RlpIsTooShort);
        assert_eq!(decode::<Vec<u8>>(&[]).unwrap_err(), Error::RlpIsTooShort);
    }

    #[test]
    fn item_overrunning_list_fails() {
        // list claims 3 payload bytes, the inner string claims 3 as well
        let data = vec![0xc3, 0x83, b'c', b'a', b't'];
        let rlp = Rlp::new(&data);
        assert_eq!(rlp.item_count().unwrap_err(), Error::RlpInconsistentLengthAndData);
    }

    #[test]
    fn non_canonical_single_byte_fails() {
        assert_eq!(decode::<Vec<u8>>(&[0x81, 0x05]).unwrap_err(), Error::RlpInvalidIndirection);
        assert_eq!(decode::<Vec<u8>>(&[0x81, 0x80]).unwrap(), vec![0x80]);
    }

    #[test]
    fn non_canonical_long_length_fails() {
        let mut data = vec![0xb8, 0x03];
        data.extend_from_slice(b"cat");
        assert_eq!(decode::<Vec<u8>>(&data).unwrap_err(), Error::RlpInvalidIndirection);

        let mut data = vec![0xb9, 0x00, 0x38];
        data.extend(std::iter::repeat(0u8).take(56));
        assert_eq!(decode::<Vec<u8>>(&data).unwrap_err(), Error::RlpDataLenWithZeroPrefix);
    }

    #[test]
    fn trailing_bytes_fail() {
        assert_eq!(decode::<Vec<u8>>(&[0x83, b'c', b'a', b't', 0x00]).unwrap_err(), Error::RlpIsTooBig);
    }

    #[test]
    fn shape_mismatch_fails() {
        assert_eq!(Rlp::new(&[0xc0]).data().unwrap_err(), Error::RlpExpectedToBeData);
        assert_eq!(Rlp::new(&[0x80]).item_count().unwrap_err(), Error::RlpExpectedToBeList);
        assert!(Rlp::new(&[0x80]).is_empty());
        assert!(Rlp::new(&[0xc0]).is_empty());
    }
}
