//!
//! Short-id addresses. An [`Address`] is the 20-byte hash of a public key;
//! owner sets list them in ascending byte order, which makes the byte order
//! of this type part of the transaction format.
//!

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Size of an address payload in bytes.
pub const ADDRESS_SIZE: usize = 20;

#[derive(Error, PartialEq, Eq, Debug, Clone)]
pub enum AddressError {
    #[error("Invalid address length {0}, expected {ADDRESS_SIZE} bytes")]
    InvalidLength(usize),

    #[error("Invalid character in address `{0}`")]
    DecodingError(String),
}

/// `Address` serializes to and from a lowercase hex string, optionally `0x` prefixed.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, BorshSerialize, BorshDeserialize)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    #[inline(always)]
    pub const fn new(payload: [u8; ADDRESS_SIZE]) -> Self {
        Self(payload)
    }

    pub fn try_from_slice(payload: &[u8]) -> Result<Self, AddressError> {
        let payload: [u8; ADDRESS_SIZE] = payload.try_into().map_err(|_| AddressError::InvalidLength(payload.len()))?;
        Ok(Self(payload))
    }

    #[inline(always)]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        let mut hex = [0u8; ADDRESS_SIZE * 2];
        faster_hex::hex_encode(&self.0, &mut hex).map(|s| s.to_string()).unwrap_or_default()
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(payload: [u8; ADDRESS_SIZE]) -> Self {
        Self(payload)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix("0x").unwrap_or(s);
        if hex.len() != ADDRESS_SIZE * 2 {
            return Err(AddressError::InvalidLength(hex.len() / 2));
        }
        let mut payload = [0u8; ADDRESS_SIZE];
        faster_hex::hex_decode(hex.as_bytes(), &mut payload).map_err(|_| AddressError::DecodingError(s.to_string()))?;
        Ok(Self(payload))
    }
}

impl TryFrom<&str> for Address {
    type Error = AddressError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        Address::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parse_and_display() {
        let s = "0x3cb7d3842e8cee6a0ebd09f1fe884f6861e1b29c";
        let address = Address::from_str(s).unwrap();
        assert_eq!(address.to_string(), s);
        // prefix is optional
        assert_eq!(Address::from_str(&s[2..]).unwrap(), address);

        assert_eq!(Address::from_str("0x3cb7"), Err(AddressError::InvalidLength(2)));
        assert!(matches!(Address::from_str("0xzzb7d3842e8cee6a0ebd09f1fe884f6861e1b29c"), Err(AddressError::DecodingError(_))));
        assert_eq!(Address::try_from_slice(&[1u8; 19]), Err(AddressError::InvalidLength(19)));
    }

    #[test]
    fn test_address_byte_order() {
        let a = Address::new([0u8; ADDRESS_SIZE]);
        let mut b = [0u8; ADDRESS_SIZE];
        b[ADDRESS_SIZE - 1] = 1;
        let b = Address::new(b);
        let mut c = [0u8; ADDRESS_SIZE];
        c[0] = 1;
        let c = Address::new(c);

        let mut list = vec![c, a, b];
        list.sort();
        assert_eq!(list, vec![a, b, c]);
    }

    #[test]
    fn test_address_serde() {
        let address = Address::new([7u8; ADDRESS_SIZE]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, "\"0x0707070707070707070707070707070707070707\"");
        assert_eq!(serde_json::from_str::<Address>(&json).unwrap(), address);
    }
}
