use kiwi_core::blockchain::block_record::BlockRecord;
use kiwi_core::blockchain::blockchain_state::BlockchainState;
use kiwi_core::blockchain::coin_record::CoinRecord;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AdditionsAndRemovalsResp {
    pub additions: Vec<CoinRecord>,
    pub removals: Vec<CoinRecord>,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockchainStateResp {
    pub blockchain_state: BlockchainState,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecordResp {
    pub block_record: BlockRecord,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinRecordResp {
    pub coin_record: Option<CoinRecord>,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinRecordAryResp {
    pub coin_records: Vec<CoinRecord>,
    pub success: bool,
}
