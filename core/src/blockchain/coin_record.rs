use crate::blockchain::coin::Coin;
use crate::blockchain::sized_bytes::Bytes32;
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct CoinRecord {
    pub coin: Coin,
    pub confirmed_block_index: u32,
    pub spent_block_index: u32,
    pub timestamp: u64,
    pub coinbase: bool,
    #[serde(default)]
    pub spent: bool,
}

impl CoinRecord {
    #[must_use]
    pub fn name(&self) -> Bytes32 {
        self.coin.name()
    }

    /// The node reports `spent_block_index == 0` for coins that are still unspent.
    #[must_use]
    pub fn is_spent(&self) -> bool {
        self.spent || self.spent_block_index > 0
    }

    #[must_use]
    pub fn spent_height(&self) -> Option<u32> {
        self.is_spent().then_some(self.spent_block_index)
    }
}
