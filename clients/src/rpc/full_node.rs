use crate::api::full_node::FullnodeAPI;
use crate::api::responses::{
    AdditionsAndRemovalsResp, BlockRecordResp, BlockchainStateResp, CoinRecordAryResp,
    CoinRecordResp,
};
use crate::rpc::{get_client, get_url, post};
use async_trait::async_trait;
use kiwi_core::blockchain::block_record::BlockRecord;
use kiwi_core::blockchain::blockchain_state::BlockchainState;
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use reqwest::Client;
use serde_json::{json, Map};
use std::collections::HashMap;
use std::io::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

pub struct FullnodeClient {
    client: Client,
    pub host: String,
    pub port: u16,
    pub ssl_path: Option<String>,
    pub additional_headers: Option<HashMap<String, String>>,
}

impl FullnodeClient {
    pub fn new(
        host: &str,
        port: u16,
        timeout: u64,
        ssl_path: Option<String>,
        additional_headers: &Option<HashMap<String, String>>,
    ) -> Result<Self, Error> {
        Ok(FullnodeClient {
            client: get_client(ssl_path.as_deref(), timeout)?,
            host: host.to_string(),
            port,
            ssl_path,
            additional_headers: additional_headers.clone(),
        })
    }

    fn url(&self, request_uri: &str) -> String {
        get_url(self.host.as_str(), self.port, request_uri)
    }
}

#[async_trait]
impl FullnodeAPI for FullnodeClient {
    async fn get_blockchain_state(&self) -> Result<BlockchainState, Error> {
        Ok(post::<BlockchainStateResp>(
            &self.client,
            &self.url("get_blockchain_state"),
            &Map::new(),
            &self.additional_headers,
        )
        .await?
        .blockchain_state)
    }
    async fn get_block_record_by_height(&self, height: u32) -> Result<BlockRecord, Error> {
        let mut request_body = Map::new();
        request_body.insert("height".to_string(), json!(height));
        Ok(post::<BlockRecordResp>(
            &self.client,
            &self.url("get_block_record_by_height"),
            &request_body,
            &self.additional_headers,
        )
        .await?
        .block_record)
    }
    async fn get_additions_and_removals(
        &self,
        header_hash: &Bytes32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), Error> {
        let mut request_body = Map::new();
        request_body.insert("header_hash".to_string(), json!(header_hash));
        let resp = post::<AdditionsAndRemovalsResp>(
            &self.client,
            &self.url("get_additions_and_removals"),
            &request_body,
            &self.additional_headers,
        )
        .await?;
        Ok((resp.additions, resp.removals))
    }
    async fn get_coin_records_by_puzzle_hash(
        &self,
        puzzle_hash: &Bytes32,
        include_spent_coins: Option<bool>,
        start_height: Option<u32>,
        end_height: Option<u32>,
    ) -> Result<Vec<CoinRecord>, Error> {
        let mut request_body = Map::new();
        request_body.insert("puzzle_hash".to_string(), json!(puzzle_hash));
        if let Some(include_spent_coins) = include_spent_coins {
            request_body.insert(
                "include_spent_coins".to_string(),
                json!(include_spent_coins),
            );
        }
        if let Some(start_height) = start_height {
            request_body.insert("start_height".to_string(), json!(start_height));
        }
        if let Some(end_height) = end_height {
            request_body.insert("end_height".to_string(), json!(end_height));
        }
        Ok(post::<CoinRecordAryResp>(
            &self.client,
            &self.url("get_coin_records_by_puzzle_hash"),
            &request_body,
            &self.additional_headers,
        )
        .await?
        .coin_records)
    }
    async fn get_coin_record_by_name(&self, name: &Bytes32) -> Result<Option<CoinRecord>, Error> {
        let mut request_body = Map::new();
        request_body.insert("name".to_string(), json!(name));
        Ok(post::<CoinRecordResp>(
            &self.client,
            &self.url("get_coin_record_by_name"),
            &request_body,
            &self.additional_headers,
        )
        .await?
        .coin_record)
    }
}
