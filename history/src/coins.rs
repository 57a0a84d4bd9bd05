use crate::error::HistoryError;
use crate::history::{owner_puzzle_hash, HistoryOptions};
use kiwi_clients::api::full_node::FullnodeAPI;
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use log::info;
use serde::{Deserialize, Serialize};

/// An unspent coin as handed to wallets for building spends. The amount is a
/// string so clients without 64 bit integers keep full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub parent_coin_info: Bytes32,
    pub puzzle_hash: Bytes32,
    pub amount: String,
}

impl From<&CoinRecord> for Utxo {
    fn from(record: &CoinRecord) -> Self {
        Utxo {
            parent_coin_info: record.coin.parent_coin_info,
            puzzle_hash: record.coin.puzzle_hash,
            amount: record.coin.amount.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub amount: u128,
    pub address: String,
}

async fn unspent_records<T>(
    client: &T,
    address: &str,
    options: &HistoryOptions,
) -> Result<Vec<CoinRecord>, HistoryError>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    let puzzle_hash = owner_puzzle_hash(address, options)?;
    let records = client
        .get_coin_records_by_puzzle_hash(&puzzle_hash, Some(false), None, None)
        .await
        .map_err(|source| HistoryError::CoinListing {
            address: address.to_string(),
            source,
        })?;
    Ok(records.into_iter().filter(|r| !r.is_spent()).collect())
}

pub async fn unspent_coins<T>(
    client: &T,
    address: &str,
    options: &HistoryOptions,
) -> Result<Vec<Utxo>, HistoryError>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    info!("utxos request: {address}");
    let utxos: Vec<Utxo> = unspent_records(client, address, options)
        .await?
        .iter()
        .map(Utxo::from)
        .collect();
    info!("utxos response: {address}, {} coins", utxos.len());
    Ok(utxos)
}

pub async fn balance<T>(
    client: &T,
    address: &str,
    options: &HistoryOptions,
) -> Result<Balance, HistoryError>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    info!("balance request: {address}");
    let amount = unspent_records(client, address, options)
        .await?
        .iter()
        .map(|r| u128::from(r.coin.amount))
        .sum();
    info!("balance response: {address}, {amount}");
    Ok(Balance {
        amount,
        address: address.to_string(),
    })
}
