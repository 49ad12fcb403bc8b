use std::cmp::Ordering;
use std::collections::binary_heap::PeekMut;
use std::collections::{BinaryHeap, HashMap};

use common::{Address, U256};
use log::{debug, warn};
use transaction::{Signer, Transaction};

/// The pending transactions of one sender, consumed from the front.
#[derive(Debug)]
struct Account<'a> {
    sender: Address,
    txs: &'a [Transaction],
}

/// The current head of an account in the price heap.
#[derive(Debug, PartialEq, Eq)]
struct Head {
    price: U256,
    /// Position in `accounts`
    index: usize,
}

impl Ord for Head {
    /// Higher price first, then the account that sorted first.
    fn cmp(&self, other: &Self) -> Ordering {
        self.price.cmp(&other.price).then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Merges nonce-sorted per-sender transaction lists into one stream ordered by
/// descending gas price, never breaking a sender's nonce order.
///
/// The lists are borrowed, not copied. Equal prices are served in ascending
/// sender address order.
#[derive(Debug)]
pub struct TransactionsByPriceAndNonce<'a> {
    accounts: Vec<Account<'a>>,
    heads: BinaryHeap<Head>,
}

impl<'a> TransactionsByPriceAndNonce<'a> {
    /// Each list in `txs` must be sorted by ascending nonce. The sender of every
    /// list head is resolved once through `signer`; a list whose head does not
    /// authenticate is dropped whole.
    pub fn new(signer: &dyn Signer, txs: &'a HashMap<Address, Vec<Transaction>>) -> Self {
        let mut lists: Vec<(&Address, &'a Vec<Transaction>)> =
            txs.iter().filter(|(_, list)| !list.is_empty()).collect();
        lists.sort_by_key(|(address, _)| **address);

        let mut accounts = Vec::with_capacity(lists.len());
        let mut heads = BinaryHeap::with_capacity(lists.len());
        for (address, list) in lists {
            let head = &list[0];
            let sender = match head.sender(signer) {
                Ok(sender) => sender,
                Err(e) => {
                    warn!("dropping {} transactions queued for {:?}: {}", list.len(), address, e);
                    continue;
                }
            };
            heads.push(Head { price: head.gas_price(), index: accounts.len() });
            accounts.push(Account { sender, txs: list.as_slice() });
        }

        TransactionsByPriceAndNonce { accounts, heads }
    }

    /// The next transaction by price, without consuming it.
    pub fn peek(&self) -> Option<&'a Transaction> {
        self.heads.peek().map(|head| &self.accounts[head.index].txs[0])
    }

    /// Like `peek`, together with the recovered sender.
    pub fn peek_with_sender(&self) -> Option<(Address, &'a Transaction)> {
        self.heads.peek().map(|head| {
            let account = &self.accounts[head.index];
            (account.sender, &account.txs[0])
        })
    }

    /// Replaces the peeked transaction with the next one of the same sender.
    pub fn shift(&mut self) {
        if let Some(mut head) = self.heads.peek_mut() {
            let account = &mut self.accounts[head.index];
            let txs = account.txs;
            account.txs = &txs[1..];
            match account.txs.first() {
                Some(next) => head.price = next.gas_price(),
                None => {
                    PeekMut::pop(head);
                }
            }
        }
    }

    /// Drops the sender of the peeked transaction along with everything it
    /// still has queued.
    pub fn pop(&mut self) {
        if let Some(head) = self.heads.pop() {
            let account = &self.accounts[head.index];
            debug!("dropping {} queued transactions of {:?}", account.txs.len(), account.sender);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use common::{Address, KeyPair, Secret, U256};
    use transaction::{sign_tx, HomesteadSigner, Signer, Transaction};

    use crate::TransactionsByPriceAndNonce;

    fn key(i: u8) -> KeyPair {
        KeyPair::from_secret(Secret::from([i + 1; 32])).unwrap()
    }

    fn signed(pair: &KeyPair, nonce: u64, price: u64) -> Transaction {
        let tx = Transaction::new(nonce, Address::zero(), U256::from(100), 100, U256::from(price), vec![]);
        sign_tx(&tx, &HomesteadSigner, pair.secret()).unwrap()
    }

    fn drain<'a>(set: &mut TransactionsByPriceAndNonce<'a>) -> Vec<&'a Transaction> {
        let mut out = vec![];
        while let Some(tx) = set.peek() {
            out.push(tx);
            set.shift();
        }
        out
    }

    #[test]
    fn price_nonce_sort_works() {
        let _ = env_logger::builder().is_test(true).try_init();
        let keys: Vec<KeyPair> = (0..25).map(key).collect();
        let mut groups = HashMap::new();
        for (start, pair) in keys.iter().enumerate() {
            let start = start as u64;
            let txs = (0..25).map(|i| signed(pair, start + i, start + i)).collect::<Vec<_>>();
            groups.insert(pair.address(), txs);
        }

        let mut set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        let txs = drain(&mut set);
        assert_eq!(txs.len(), 25 * 25);

        let mut last_nonce = HashMap::new();
        for (i, tx) in txs.iter().enumerate() {
            let from = tx.sender(&HomesteadSigner).unwrap();
            if let Some(prev) = last_nonce.insert(from, tx.nonce()) {
                assert!(prev < tx.nonce());
            }
            if let Some(next) = txs.get(i + 1) {
                if from != next.sender(&HomesteadSigner).unwrap() {
                    assert!(tx.gas_price() >= next.gas_price());
                }
            }
        }
        assert!(set.is_empty());
    }

    #[test]
    fn nonce_beats_price() {
        let pair = key(0);
        let mut groups = HashMap::new();
        groups.insert(pair.address(), vec![signed(&pair, 0, 1), signed(&pair, 1, 50)]);
        let other = key(1);
        groups.insert(other.address(), vec![signed(&other, 0, 10)]);

        let mut set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        let prices: Vec<u64> = drain(&mut set).iter().map(|tx| tx.gas_price().low_u64()).collect();
        assert_eq!(prices, vec![10, 1, 50]);
    }

    #[test]
    fn equal_prices_go_by_address() {
        let (a, b) = (key(0), key(1));
        let mut groups = HashMap::new();
        groups.insert(a.address(), vec![signed(&a, 0, 5)]);
        groups.insert(b.address(), vec![signed(&b, 0, 5)]);

        let set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        let (first, _) = set.peek_with_sender().unwrap();
        assert_eq!(first, a.address().min(b.address()));
    }

    #[test]
    fn pop_drops_sender() {
        let (a, b) = (key(0), key(1));
        let mut groups = HashMap::new();
        groups.insert(a.address(), vec![signed(&a, 0, 9), signed(&a, 1, 8), signed(&a, 2, 7)]);
        groups.insert(b.address(), vec![signed(&b, 0, 3), signed(&b, 1, 2)]);

        let mut set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        assert_eq!(set.peek_with_sender().unwrap().0, a.address());
        set.pop();
        let rest = drain(&mut set);
        assert_eq!(rest.len(), 2);
        assert!(rest.iter().all(|tx| HomesteadSigner.sender(tx).unwrap() == b.address()));
    }

    #[test]
    fn unauthenticated_sender_is_skipped() {
        let a = key(0);
        let mut groups = HashMap::new();
        groups.insert(a.address(), vec![signed(&a, 0, 1)]);
        let unsigned = Transaction::new(0, Address::zero(), U256::zero(), 0, U256::from(99), vec![]);
        groups.insert(Address::repeat_byte(0xff), vec![unsigned]);
        groups.insert(Address::repeat_byte(0xee), vec![]);

        let mut set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        let txs = drain(&mut set);
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].gas_price(), U256::one());
    }

    #[test]
    fn empty_set_is_noop() {
        let groups = HashMap::new();
        let mut set = TransactionsByPriceAndNonce::new(&HomesteadSigner, &groups);
        assert!(set.peek().is_none());
        set.shift();
        set.pop();
        assert!(set.is_empty());
    }
}
