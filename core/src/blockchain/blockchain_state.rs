use crate::blockchain::block_record::BlockRecord;
use crate::blockchain::sized_bytes::Bytes32;
use serde::de::{Error, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Formatter;

/// Netspace is reported as an integer wider than `u64`, some proxies send it as a string.
pub fn parse_u128<'de, D>(d: D) -> Result<u128, D::Error>
where
    D: Deserializer<'de>,
{
    struct PU128;
    impl Visitor<'_> for PU128 {
        type Value = u128;

        fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
            formatter.write_str("string or number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(u128::from(v))
        }

        fn visit_u128<E>(self, v: u128) -> Result<Self::Value, E>
        where
            E: Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            u128::try_from(v).map_err(|_| Error::custom("Invalid Value for i64"))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: Error,
        {
            if v.is_finite() && v >= 0.0 {
                Ok(v as u128)
            } else {
                Err(Error::custom("Invalid Value for f64"))
            }
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: Error,
        {
            v.parse().map_err(|_| Error::custom("Invalid Value for str"))
        }
    }
    d.deserialize_any(PU128)
}

#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Debug, Default)]
pub struct SyncState {
    pub sync_mode: bool,
    pub synced: bool,
    pub sync_tip_height: u32,
    pub sync_progress_height: u32,
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct BlockchainState {
    pub peak: Option<BlockRecord>,
    pub sync: SyncState,
    #[serde(default)]
    pub difficulty: u64,
    #[serde(default, deserialize_with = "parse_u128")]
    pub space: u128,
    #[serde(default)]
    pub node_id: Option<Bytes32>,
}

impl BlockchainState {
    #[must_use]
    pub fn peak_height(&self) -> Option<u32> {
        self.peak.as_ref().map(|p| p.height)
    }
}
