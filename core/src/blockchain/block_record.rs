use crate::blockchain::sized_bytes::Bytes32;
use serde::{Deserialize, Serialize};

/// The subset of the node's block record needed to place coin spends in time.
/// Unlisted fields in the RPC payload are ignored.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct BlockRecord {
    pub header_hash: Bytes32,
    pub prev_hash: Bytes32,
    pub height: u32,
    pub timestamp: Option<u64>,
    #[serde(default)]
    pub fees: Option<u64>,
    #[serde(default)]
    pub prev_transaction_block_height: u32,
}

impl BlockRecord {
    /// Only transaction blocks carry a timestamp.
    #[must_use]
    pub fn is_transaction_block(&self) -> bool {
        self.timestamp.is_some()
    }
}
