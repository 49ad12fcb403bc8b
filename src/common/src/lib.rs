mod crypto;
mod error;
mod hash;
mod helper;
mod num;
mod uint;

#[cfg(feature = "serialize")]
pub mod serialization;

pub use crate::crypto::*;
pub use crate::error::Error;
pub use crate::hash::*;
pub use crate::helper::*;
pub use crate::num::*;
pub use crate::uint::U256;
