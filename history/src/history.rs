use crate::error::{AmountInvariantViolation, HistoryError, LookupFailure};
use crate::lookup::{partition, resolve_units, Unit};
use crate::models::{FarmingReward, TransactionGroup};
use crate::{receive, send};
use kiwi_clients::api::full_node::FullnodeAPI;
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use kiwi_core::config::HistoryConfig;
use kiwi_keys::{decode_address, validate_prefix};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryOptions {
    pub address_prefix: String,
    pub max_concurrent_lookups: usize,
}

impl HistoryOptions {
    pub fn new(address_prefix: &str, max_concurrent_lookups: usize) -> Result<Self, HistoryError> {
        validate_prefix(address_prefix).map_err(|e| HistoryError::InvalidPrefix {
            prefix: address_prefix.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            address_prefix: address_prefix.to_string(),
            max_concurrent_lookups: max_concurrent_lookups.max(1),
        })
    }
}

impl TryFrom<&HistoryConfig> for HistoryOptions {
    type Error = HistoryError;

    fn try_from(config: &HistoryConfig) -> Result<Self, Self::Error> {
        let prefix = config
            .address_prefix()
            .map_err(|e| HistoryError::InvalidPrefix {
                prefix: config.selected_network.clone(),
                reason: e.to_string(),
            })?;
        Self::new(prefix, config.max_concurrent_lookups)
    }
}

/// Decodes `address` and checks it belongs to the configured network.
pub fn owner_puzzle_hash(address: &str, options: &HistoryOptions) -> Result<Bytes32, HistoryError> {
    let invalid = |reason: String| HistoryError::InvalidAddress {
        address: address.to_string(),
        reason,
    };
    if address.trim().is_empty() {
        return Err(invalid("Missing address".to_string()));
    }
    let (prefix, puzzle_hash) = decode_address(address).map_err(|e| invalid(e.to_string()))?;
    if prefix != options.address_prefix {
        return Err(invalid(format!(
            "expected prefix {}, found {prefix}",
            options.address_prefix
        )));
    }
    Ok(puzzle_hash)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHistory {
    pub address: String,
    pub send: Vec<TransactionGroup>,
    pub receive: Vec<TransactionGroup>,
    /// Coinbase coins of the address. They have no parent coin, so they are not receives.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub farming_rewards: Vec<FarmingReward>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lookup_failures: Vec<LookupFailure>,
}

impl TransactionHistory {
    pub fn assemble(
        address: &str,
        send: Vec<TransactionGroup>,
        receive: Vec<TransactionGroup>,
        farming_rewards: Vec<FarmingReward>,
        lookup_failures: Vec<LookupFailure>,
    ) -> Self {
        Self {
            address: address.to_string(),
            send,
            receive,
            farming_rewards,
            lookup_failures,
        }
    }

    /// Orders both lists by `(block, timestamp)`. Groups that tie keep their discovery order.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.send.sort_by_key(|g| (g.block, g.timestamp));
        self.receive.sort_by_key(|g| (g.block, g.timestamp));
        self
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &AmountInvariantViolation> {
        self.send
            .iter()
            .chain(self.receive.iter())
            .filter_map(|g| g.integrity_warning.as_ref())
    }

    pub fn is_complete(&self) -> bool {
        self.lookup_failures.is_empty()
    }
}

/// Parent units and spend units for every record that needs them, in listing order.
fn plan_units(records: &[CoinRecord]) -> Vec<Unit<'_>> {
    let mut units = vec![];
    for record in records {
        if receive::is_candidate(record) {
            units.push(Unit::Parent(record));
        }
        if send::is_candidate(record) {
            units.push(Unit::Spend(record));
        }
    }
    units
}

/// Rebuilds the send and receive events of `address` from the coin records the
/// node holds for it. Lookups that fail drop only the event they belong to.
pub async fn reconstruct_history<T>(
    client: &T,
    address: &str,
    options: &HistoryOptions,
) -> Result<TransactionHistory, HistoryError>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    info!("history request: {address}");
    let puzzle_hash = owner_puzzle_hash(address, options)?;
    let records = client
        .get_coin_records_by_puzzle_hash(&puzzle_hash, Some(true), None, None)
        .await
        .map_err(|source| HistoryError::CoinListing {
            address: address.to_string(),
            source,
        })?;
    let resolutions =
        resolve_units(client, plan_units(&records), options.max_concurrent_lookups).await;
    let (parents, mut failures) = partition(resolutions.parents);
    let (spends, spend_failures) = partition(resolutions.spends);
    failures.extend(spend_failures);
    let receive = receive::group_receives(&parents, &puzzle_hash, &options.address_prefix)?;
    let send = send::group_sends(&spends, &puzzle_hash, &options.address_prefix)?;
    let rewards = receive::farming_rewards(&records);
    let history = TransactionHistory::assemble(address, send, receive, rewards, failures);
    info!(
        "history response: {address}, {} send, {} receive, {} dropped",
        history.send.len(),
        history.receive.len(),
        history.lookup_failures.len()
    );
    Ok(history)
}
