use md5::{Digest, Md5};
use murmurhash3::murmurhash3_x86_32 as mmh3;

/// Maps a string onto the ring's ordinal space.
///
/// Implementations must be deterministic and keep no state between calls.
pub trait HashFunction {
    fn hash(&self, key: &str) -> u64;
}

/// Default strategy: the first four bytes of the MD5 digest, big-endian.
///
/// Ordinals therefore fall in `0..=u32::MAX`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5Hash;

impl Md5Hash {
    pub fn new() -> Self {
        Md5Hash
    }
}

impl HashFunction for Md5Hash {
    fn hash(&self, key: &str) -> u64 {
        // fresh digest per call so no scratch state leaks between keys
        let digest = Md5::digest(key.as_bytes());
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]) as u64
    }
}

/// Murmur3 (x86, 32-bit) over the key bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Murmur3Hash {
    seed: u32,
}

impl Murmur3Hash {
    pub fn new(seed: u32) -> Self {
        Murmur3Hash { seed }
    }
}

impl HashFunction for Murmur3Hash {
    fn hash(&self, key: &str) -> u64 {
        mmh3(key.as_bytes(), self.seed) as u64
    }
}
