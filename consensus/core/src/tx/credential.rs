use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Debug, Formatter};

/// Size of a recoverable secp256k1 signature.
pub const SIGNATURE_SIZE: usize = 65;

#[derive(Clone, Copy, PartialEq, Eq, Hash, BorshSerialize, BorshDeserialize)]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub const fn new(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    /// All-zero placeholder written into credential slots before signing.
    pub const fn empty() -> Self {
        Self([0; SIGNATURE_SIZE])
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }
}

impl Default for Signature {
    fn default() -> Self {
        Self::empty()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut hex = [0u8; SIGNATURE_SIZE * 2];
        f.write_str(faster_hex::hex_encode(&self.0, &mut hex).map_err(|_| std::fmt::Error)?)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("{:?}", self))
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as Deserialize>::deserialize(deserializer)?;
        let mut bytes = [0u8; SIGNATURE_SIZE];
        if s.len() != SIGNATURE_SIZE * 2 {
            return Err(serde::de::Error::invalid_length(s.len() / 2, &"65 bytes"));
        }
        faster_hex::hex_decode(s.as_bytes(), &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}

/// Signatures authorizing one input, one per signature slot of the input.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    pub signatures: Vec<Signature>,
}

impl Credential {
    pub fn new(signatures: Vec<Signature>) -> Self {
        Self { signatures }
    }

    /// Credential with `slots` empty signatures, the unsigned shape of an input credential.
    pub fn with_slots(slots: usize) -> Self {
        Self { signatures: vec![Signature::empty(); slots] }
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
