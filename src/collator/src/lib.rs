//! Selection of pending transactions for block building.

mod ordering;

pub use crate::ordering::TransactionsByPriceAndNonce;
