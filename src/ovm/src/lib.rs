//! Transcoding of rollup transactions into calls on the OVM contracts: the
//! sequencer message decompressor, the execution manager and the mock ECDSA
//! contract account.

mod abi;
mod config;
mod context;
mod error;
mod transcoder;

pub use abi::{kallCall, runCall, OvmTransaction};
pub use config::{OvmConfig, PRIVILEGED_SENDER};
pub use context::ExecutionContext;
pub use error::{EncodingError, Error};
pub use transcoder::{encode_fake_message, get_queue_origin, get_signature_type, OvmTranscoder, SignatureType};
