use fixed_hash::{construct_fixed_hash, impl_fixed_hash_conversions};
use tiny_keccak::{Hasher as KeccakHasherTrait, Keccak};

pub const HASH_LENGTH: usize = 32;
pub const ADDRESS_LENGTH: usize = 20;

construct_fixed_hash! {
    /// 160 bit fixed hash, the width of an account address.
    pub struct H160(ADDRESS_LENGTH);
}
construct_fixed_hash! {
    /// 256 bit fixed hash.
    pub struct H256(HASH_LENGTH);
}
construct_fixed_hash! {
    /// 512 bit fixed hash, an uncompressed public key without its prefix byte.
    pub struct H512(64);
}

impl_fixed_hash_conversions!(H256, H160);

pub type Address = H160;

/// Keccak-256 of the empty byte string.
pub const KECCAK_EMPTY: H256 = H256([
    0xc5, 0xd2, 0x46, 0x01, 0x86, 0xf7, 0x23, 0x3c, 0x92, 0x7e, 0x7d, 0xb2, 0xdc, 0xc7, 0x03, 0xc0,
    0xe5, 0x00, 0xb6, 0x53, 0xca, 0x82, 0x27, 0x3b, 0x7b, 0xfa, 0xd8, 0x04, 0x5d, 0x85, 0xa4, 0x70,
]);

/// Trait describing an object that can hash a slice of bytes. Used to abstract
/// other types over the hashing algorithm.
pub trait Hasher: Sync + Send {
    /// The length in bytes of the `Hasher` output
    const LENGTH: usize;

    /// Compute the hash of the provided slice of bytes
    fn hash(x: &[u8]) -> H256;
}

pub fn keccak<T: AsRef<[u8]>>(x: T) -> H256 {
    KeccakHasher::hash(x.as_ref())
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct KeccakHasher;
impl Hasher for KeccakHasher {
    const LENGTH: usize = HASH_LENGTH;

    fn hash(x: &[u8]) -> H256 {
        let mut keccak = Keccak::v256();
        keccak.update(x);
        let mut out = [0u8; HASH_LENGTH];
        keccak.finalize(&mut out);
        H256(out)
    }
}
