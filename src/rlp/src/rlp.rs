use crate::traits::Encodable;
use crate::{LEN_CUTOFF, LIST_OFFSET, STR_OFFSET};

/// Appendable RLP encoder. Lists are opened with their item count and closed
/// automatically once that many items have been appended.
#[derive(Debug, Default)]
pub struct RLPStream {
    data: Vec<u8>,
    /// The lists currently being inserted: (payload start, items still expected)
    appending_list: Vec<(usize, usize)>,
}

impl RLPStream {
    pub fn new() -> Self {
        Self { data: vec![], appending_list: vec![] }
    }

    /// A stream whose first item is a list of `len` items.
    pub fn new_list(len: usize) -> Self {
        let mut stream = Self::new();
        stream.begin_list(len);
        stream
    }

    /// Boolean flag indicates whether the stream is still processing a list
    fn is_processing_list(&self) -> bool {
        !self.appending_list.is_empty()
    }

    /// Finish appending to a current list
    fn finish_list(&mut self, pos: usize) {
        let data_len = self.data.len() - pos;
        let enc_vec = encode_length(data_len, LIST_OFFSET);
        let enc_len = enc_vec.len();
        self.data.extend(enc_vec);
        self.data[pos..].rotate_right(enc_len);
    }

    /// Increment the list of items appended. `items` indicates how many items appended.
    fn list_appended(&mut self, items: usize) {
        if !self.is_processing_list() {
            return;
        }
        let idx = self.appending_list.len() - 1;
        let (pos, pending_size) = &mut self.appending_list[idx];
        if items > *pending_size {
            panic!("items cannot be more than size");
        }
        *pending_size -= items;

        // the current list is done
        if *pending_size == 0 {
            let p = *pos;
            self.appending_list.pop();
            self.finish_list(p);
            self.list_appended(1);
        }
    }

    /// Open a list of `len` items. An empty list is written immediately.
    pub fn begin_list(&mut self, len: usize) -> &mut Self {
        if len == 0 {
            self.data.push(LIST_OFFSET);
            self.list_appended(1);
        } else {
            self.appending_list.push((self.data.len(), len));
        }
        self
    }

    /// Append a value as one item.
    pub fn append<E: Encodable + ?Sized>(&mut self, e: &E) -> &mut Self {
        e.encode(self);
        self
    }

    /// Append the empty byte string.
    pub fn append_empty_data(&mut self) -> &mut Self {
        self.data.push(STR_OFFSET);
        self.list_appended(1);
        self
    }

    /// Write a byte string item.
    pub fn write_iter<I: Iterator<Item = u8>>(&mut self, mut iter: I) {
        let len = match iter.size_hint() {
            (lo, Some(up)) if lo == up => lo,
            _ => {
                return self.write_iter(iter.collect::<Vec<_>>().into_iter());
            }
        };

        // refer to https://eth.wiki/fundamentals/rlp
        match iter.next() {
            None => self.data.push(STR_OFFSET),
            Some(first) if len == 1 && first < STR_OFFSET => self.data.push(first),
            Some(first) => {
                self.data.extend(encode_length(len, STR_OFFSET));
                self.data.push(first);
                self.data.extend(iter);
            }
        }
        self.list_appended(1);
    }

    pub fn is_finished(&self) -> bool {
        !self.is_processing_list()
    }

    pub fn out(self) -> Vec<u8> {
        debug_assert!(self.is_finished(), "out called on an unfinished list");
        self.data
    }
}

fn to_binary(x: usize, data: &mut Vec<u8>) {
    if x == 0 {
        return;
    }
    to_binary(x / 256, data);
    data.push((x % 256) as u8);
}

fn encode_length(len: usize, offset: u8) -> Vec<u8> {
    if len <= LEN_CUTOFF as usize {
        vec![len as u8 + offset]
    } else {
        let mut data = vec![];
        to_binary(len, &mut data);
        let mut out = vec![data.len() as u8 + offset + LEN_CUTOFF];
        out.extend(data);
        out
    }
}
