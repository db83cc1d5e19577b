//! Digest functions used to seed index derivation
//!
//! Each [`HashFunction`] maps a payload to a fixed-length digest. The digest
//! is read as a big-endian unsigned integer and reduced modulo the filter
//! size to obtain a seed value. The functions are chosen for independence
//! of their outputs, not for cryptographic strength.

use std::fmt;
use std::hash::Hasher;
use std::io::Cursor;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use sha3::{Keccak256, Sha3_256};
use siphasher::sip128::{Hasher128, SipHasher13};

/// A configured digest algorithm
///
/// Two hash functions are the same when their algorithm and parameters
/// match; the digest objects themselves are created per call and never
/// shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashFunction {
    /// SHA-256 (32-byte digest)
    Sha256,
    /// SHA-512 (64-byte digest)
    Sha512,
    /// SHA3-256 (32-byte digest)
    #[serde(rename = "sha3_256")]
    Sha3_256,
    /// Keccak-256 (32-byte digest)
    Keccak256,
    /// BLAKE3 (32-byte digest)
    Blake3,
    /// MurmurHash3 x64 128-bit with a seed
    Murmur3 { seed: u32 },
    /// SipHash-1-3 128-bit with a key
    #[serde(rename = "siphash13")]
    SipHash13 { key0: u64, key1: u64 },
}

impl HashFunction {
    /// Algorithm name, without parameters
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
            Self::Sha3_256 => "SHA3-256",
            Self::Keccak256 => "Keccak-256",
            Self::Blake3 => "BLAKE3",
            Self::Murmur3 { .. } => "Murmur3-x64-128",
            Self::SipHash13 { .. } => "SipHash-1-3-128",
        }
    }

    /// Length of the digest in bytes
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha512 => 64,
            Self::Sha256 | Self::Sha3_256 | Self::Keccak256 | Self::Blake3 => 32,
            Self::Murmur3 { .. } | Self::SipHash13 { .. } => 16,
        }
    }

    /// Digest a payload with a fresh hasher
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self {
            Self::Sha256 => Sha256::digest(data).to_vec(),
            Self::Sha512 => Sha512::digest(data).to_vec(),
            Self::Sha3_256 => Sha3_256::digest(data).to_vec(),
            Self::Keccak256 => Keccak256::digest(data).to_vec(),
            Self::Blake3 => blake3::hash(data).as_bytes().to_vec(),
            Self::Murmur3 { seed } => {
                let mut cursor = Cursor::new(data);
                // Reading from an in-memory cursor cannot fail
                let hash = murmur3::murmur3_x64_128(&mut cursor, *seed).unwrap_or(0);
                hash.to_be_bytes().to_vec()
            }
            Self::SipHash13 { key0, key1 } => {
                let mut hasher = SipHasher13::new_with_keys(*key0, *key1);
                hasher.write(data);
                hasher.finish128().as_u128().to_be_bytes().to_vec()
            }
        }
    }

    /// Digest a payload and reduce it to a value in `[0, modulus)`
    pub fn value_mod(&self, data: &[u8], modulus: usize) -> usize {
        reduce_mod(&self.digest(data), modulus)
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Murmur3 { seed } => write!(f, "{}(seed={})", self.name(), seed),
            Self::SipHash13 { key0, key1 } => {
                write!(f, "{}(key={:#x}:{:#x})", self.name(), key0, key1)
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// Interpret `bytes` as a big-endian unsigned integer and reduce it mod `modulus`
///
/// Returns 0 for a zero modulus.
pub fn reduce_mod(bytes: &[u8], modulus: usize) -> usize {
    if modulus == 0 {
        return 0;
    }
    let m = modulus as u128;
    bytes
        .iter()
        .fold(0u128, |acc, &byte| ((acc << 8) | byte as u128) % m) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [HashFunction; 7] = [
        HashFunction::Sha256,
        HashFunction::Sha512,
        HashFunction::Sha3_256,
        HashFunction::Keccak256,
        HashFunction::Blake3,
        HashFunction::Murmur3 { seed: 0 },
        HashFunction::SipHash13 { key0: 0, key1: 0 },
    ];

    #[test]
    fn test_digest_deterministic() {
        let element = b"test_address_0xABCD";
        for function in ALL {
            assert_eq!(
                function.digest(element),
                function.digest(element),
                "{} must be deterministic",
                function
            );
        }
    }

    #[test]
    fn test_digest_output_length() {
        for function in ALL {
            assert_eq!(
                function.digest(b"payload").len(),
                function.output_len(),
                "{} digest length",
                function
            );
        }
    }

    #[test]
    fn test_sha256_known_vector() {
        let digest = HashFunction::Sha256.digest(b"abc");
        assert_eq!(&digest[..4], &[0xba, 0x78, 0x16, 0xbf]);
    }

    #[test]
    fn test_seed_changes_murmur_output() {
        let a = HashFunction::Murmur3 { seed: 0 }.digest(b"element");
        let b = HashFunction::Murmur3 { seed: 1 }.digest(b"element");
        assert_ne!(a, b, "Different seeds must produce different outputs");
    }

    #[test]
    fn test_equality_by_configuration() {
        assert_eq!(HashFunction::Sha256, HashFunction::Sha256);
        assert_ne!(HashFunction::Sha256, HashFunction::Sha512);
        assert_eq!(
            HashFunction::Murmur3 { seed: 7 },
            HashFunction::Murmur3 { seed: 7 }
        );
        assert_ne!(
            HashFunction::Murmur3 { seed: 7 },
            HashFunction::Murmur3 { seed: 8 }
        );
    }

    #[test]
    fn test_reduce_mod_matches_integer_arithmetic() {
        assert_eq!(reduce_mod(&[0x01, 0x00], 7), 256 % 7);
        assert_eq!(reduce_mod(&[0xff; 4], 1000), (u32::MAX as usize) % 1000);
        assert_eq!(reduce_mod(&[], 13), 0);
        assert_eq!(reduce_mod(&[0xab, 0xcd], 0), 0);
    }

    #[test]
    fn test_reduce_mod_wide_digest_in_range() {
        let digest = HashFunction::Sha512.digest(b"wide");
        for m in [1usize, 2, 144, 10_007, usize::MAX] {
            assert!(reduce_mod(&digest, m) < m, "value must be below m={}", m);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&HashFunction::Sha3_256).unwrap();
        assert_eq!(json, "\"sha3_256\"");
        let parsed: HashFunction = serde_json::from_str("{\"murmur3\":{\"seed\":3}}").unwrap();
        assert_eq!(parsed, HashFunction::Murmur3 { seed: 3 });
    }
}
