use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

pub const HASH_SIZE: usize = 32;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum HashError {
    #[error("Invalid hash length {0}, expected {HASH_SIZE} bytes")]
    InvalidLength(usize),

    #[error("Invalid hex string")]
    InvalidHex,
}

/// A 32-byte identifier. Used for transaction ids, asset ids and chain ids.
/// Ordering is the lexicographic byte order.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        let bytes: [u8; HASH_SIZE] = bytes.try_into().map_err(|_| HashError::InvalidLength(bytes.len()))?;
        Ok(Hash(bytes))
    }

    /// Places `word` in the last 8 bytes (big endian). Convenient for fixtures,
    /// since the resulting hashes sort in the same order as the words.
    #[inline(always)]
    pub const fn from_u64_word(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        let word = word.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[HASH_SIZE - 8 + i] = word[i];
            i += 1;
        }
        Hash(bytes)
    }

    pub fn to_hex(&self) -> String {
        let mut hex = [0u8; HASH_SIZE * 2];
        // the output buffer is exactly twice the input length, encoding cannot fail
        faster_hex::hex_encode(&self.0, &mut hex).map(|s| s.to_string()).unwrap_or_default()
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl From<u64> for Hash {
    fn from(word: u64) -> Self {
        Self::from_u64_word(word)
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        if hash_str.len() != HASH_SIZE * 2 {
            return Err(HashError::InvalidLength(hash_str.len() / 2));
        }
        let mut bytes = [0u8; HASH_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes).map_err(|_| HashError::InvalidHex)?;
        Ok(Hash(bytes))
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Hash::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Hash, HashError};
    use std::str::FromStr;

    #[test]
    fn test_hash_basics() {
        let hash_str = "8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3af";
        let hash = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash_str, hash.to_string());
        let hash2 = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash, hash2);

        let hash3 = Hash::from_str("8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3ab").unwrap();
        assert_ne!(hash2, hash3);

        let short_str = "8e40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3";
        assert_eq!(Hash::from_str(short_str), Err(HashError::InvalidLength(31)));
        let bad_str = "zz40af02265360d59f4ecf9ae9ebf8f00a3118408f5a9cdcbcc9c0f93642f3af";
        assert_eq!(Hash::from_str(bad_str), Err(HashError::InvalidHex));
    }

    #[test]
    fn test_hash_ordering_follows_bytes() {
        let mut hashes = vec![Hash::from_u64_word(3), Hash::from_u64_word(1 << 40), Hash::from_u64_word(2)];
        hashes.sort();
        assert_eq!(hashes, vec![Hash::from_u64_word(2), Hash::from_u64_word(3), Hash::from_u64_word(1 << 40)]);

        let mut high = [0u8; 32];
        high[0] = 1;
        assert!(Hash::from_bytes(high) > Hash::from_u64_word(u64::MAX));
    }

    #[test]
    fn test_hash_serde_as_hex() {
        let hash = Hash::from_u64_word(0xdeadbeef);
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"00000000000000000000000000000000000000000000000000000000deadbeef\"");
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
