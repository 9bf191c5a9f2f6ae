#![forbid(unsafe_code)]

use sha1::{Digest, Sha1};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Hashes a string key into the 64-bit guid space.
///
/// Implementations must be deterministic and must not depend on anything
/// process-local, since guids are the join key between graphs produced by
/// different processes.
pub trait KeyHasher: fmt::Debug + Send + Sync {
    fn hash_key(&self, key: &str) -> u64;
}

/// Low 64 bits of the SHA-1 digest, read little-endian.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha1KeyHasher;

impl KeyHasher for Sha1KeyHasher {
    fn hash_key(&self, key: &str) -> u64 {
        let digest = Sha1::digest(key.as_bytes());
        let mut low = [0u8; 8];
        low.copy_from_slice(&digest[..8]);
        u64::from_le_bytes(low)
    }
}

/// Identifier of a dump node, shared across processes.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Guid(u64);

impl Guid {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Deterministic guid for a string key using the default hasher.
    pub fn from_key(key: &str) -> Self {
        Self::from_key_with(&Sha1KeyHasher, key)
    }

    pub fn from_key_with(hasher: &dyn KeyHasher, key: &str) -> Self {
        Self(hasher.hash_key(key))
    }

    pub const fn to_u64(self) -> u64 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<u64> for Guid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::Debug for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guid").field(&format_args!("{self}")).finish()
    }
}

impl FromStr for Guid {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        u64::from_str_radix(s, 16).map(Self)
    }
}

/// Process identity mixed into local dump guids.
///
/// Two dumps built with the same token assign the same guid to the same name,
/// so graphs assembled independently for one process can be merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProcessToken(u64);

impl ProcessToken {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn current() -> Self {
        Self(u64::from(std::process::id()))
    }

    pub const fn to_u64(self) -> u64 {
        self.0
    }

    /// Guid of a dump named `name` inside this process.
    pub fn dump_guid(self, name: &str) -> Guid {
        self.dump_guid_with(&Sha1KeyHasher, name)
    }

    pub fn dump_guid_with(self, hasher: &dyn KeyHasher, name: &str) -> Guid {
        Guid::from_key_with(hasher, &format!("{:x}:{name}", self.0))
    }
}
