use hex::{decode, encode};
use serde::de::{Error as DeError, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io::{Error, ErrorKind};
use std::str::FromStr;

pub fn prep_hex_str(to_fix: &str) -> String {
    let lc = to_fix.trim().to_lowercase();
    match lc.strip_prefix("0x") {
        Some(s) => s.to_string(),
        None => lc,
    }
}

pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, Error> {
    decode(prep_hex_str(hex)).map_err(|e| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Failed to decode hex string {hex}: {e}"),
        )
    })
}

/// Fixed 32 byte value used for coin ids, puzzle hashes and header hashes.
/// Serialized as a lowercase hex string, parsed with or without a `0x` prefix.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes32 {
    pub bytes: [u8; 32],
}

impl Bytes32 {
    pub const SIZE: usize = 32;

    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            Error::new(
                ErrorKind::InvalidData,
                format!(
                    "Failed to parse Bytes32, expected {} bytes, found {}",
                    Self::SIZE,
                    bytes.len()
                ),
            )
        })?;
        Ok(Self { bytes })
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        self.bytes.iter().all(|v| *v == 0)
    }
}

impl FromStr for Bytes32 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&hex_to_bytes(s)?)
    }
}

impl TryFrom<&str> for Bytes32 {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<[u8; 32]> for Bytes32 {
    fn from(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }
}

impl From<&[u8; 32]> for Bytes32 {
    fn from(bytes: &[u8; 32]) -> Self {
        Self { bytes: *bytes }
    }
}

impl AsRef<[u8]> for Bytes32 {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.bytes))
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self.bytes))
    }
}

impl Serialize for Bytes32 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct Bytes32Visitor;

impl Visitor<'_> for Bytes32Visitor {
    type Value = Bytes32;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a hex string of 32 bytes")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: DeError,
    {
        value.parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Bytes32 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(Bytes32Visitor)
    }
}
