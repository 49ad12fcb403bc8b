//! Addresses of the OVM system contracts.

use std::fs;
use std::path::Path;

use common::{Address, H160};
use serde::{Deserialize, Serialize};

use crate::Error;

/// The reserved sender whose transactions skip transcoding,
/// `0x0444400000000000000000000000000000000000`.
pub const PRIVILEGED_SENDER: Address = H160([
    0x04, 0x44, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00,
]);

fn default_privileged_sender() -> Address {
    PRIVILEGED_SENDER
}

/// Where transcoded messages are sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct OvmConfig {
    /// Sender whose transactions pass through unchanged.
    #[serde(default = "default_privileged_sender")]
    pub privileged_sender: Address,
    /// The sequencer message decompressor.
    pub decompressor: Address,
    /// The execution manager.
    pub execution_manager: Address,
    /// The state manager handed to every execution manager run.
    pub state_manager: Address,
}

impl OvmConfig {
    pub fn new(decompressor: Address, execution_manager: Address, state_manager: Address) -> Self {
        OvmConfig { privileged_sender: PRIVILEGED_SENDER, decompressor, execution_manager, state_manager }
    }

    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
