//! Block context a transaction is executed under.

use common::U256;
use serde::{Deserialize, Serialize};

/// What the execution manager learns about the enclosing block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// The block timestamp.
    pub timestamp: U256,
    /// The block number.
    pub block_number: U256,
}

impl ExecutionContext {
    pub fn new(timestamp: u64, block_number: u64) -> Self {
        ExecutionContext { timestamp: timestamp.into(), block_number: block_number.into() }
    }
}
