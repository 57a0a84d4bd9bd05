use async_trait::async_trait;
use kiwi_core::blockchain::block_record::BlockRecord;
use kiwi_core::blockchain::blockchain_state::BlockchainState;
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use std::io::Error;

/// Read-only view of a full node, the only ledger access the history service needs.
#[async_trait]
pub trait FullnodeAPI {
    async fn get_blockchain_state(&self) -> Result<BlockchainState, Error>;
    async fn get_block_record_by_height(&self, height: u32) -> Result<BlockRecord, Error>;
    async fn get_additions_and_removals(
        &self,
        header_hash: &Bytes32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), Error>;
    async fn get_coin_records_by_puzzle_hash(
        &self,
        puzzle_hash: &Bytes32,
        include_spent_coins: Option<bool>,
        start_height: Option<u32>,
        end_height: Option<u32>,
    ) -> Result<Vec<CoinRecord>, Error>;
    async fn get_coin_record_by_name(&self, name: &Bytes32) -> Result<Option<CoinRecord>, Error>;
}
