use crate::error::HistoryError;
use crate::fee::settle;
use crate::lookup::ResolvedParent;
use crate::models::{Counterparty, FarmingReward, GroupType, TransactionGroup};
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use log::debug;
use std::collections::HashMap;

/// Records that need a parent lookup. Farming rewards have no parent coin on the ledger.
pub fn is_candidate(record: &CoinRecord) -> bool {
    if record.coin.amount == 0 {
        return false;
    }
    if record.coinbase {
        debug!("Skipping reward coin {} for receives", record.name());
        return false;
    }
    true
}

/// Non-zero coinbase records, in listing order.
pub fn farming_rewards(records: &[CoinRecord]) -> Vec<FarmingReward> {
    records
        .iter()
        .filter(|r| r.coinbase && r.coin.amount != 0)
        .map(FarmingReward::from)
        .collect()
}

/// Groups coins received from other owners by the coin that created them.
///
/// The first record seen for a parent sets the group's amount, time and
/// identity; later records with the same parent only add counterparty entries.
/// Groups are returned in order of first appearance.
pub fn group_receives(
    resolved: &[ResolvedParent],
    own_puzzle_hash: &Bytes32,
    prefix: &str,
) -> Result<Vec<TransactionGroup>, HistoryError> {
    let mut order: Vec<Bytes32> = vec![];
    let mut groups: HashMap<Bytes32, TransactionGroup> = HashMap::new();
    for ResolvedParent { record, parent } in resolved {
        let coin = &record.coin;
        if coin.amount == 0 || parent.coin.puzzle_hash == *own_puzzle_hash {
            continue;
        }
        let key = coin.parent_coin_info;
        let group = groups.entry(key).or_insert_with(|| {
            order.push(key);
            TransactionGroup::new(
                GroupType::Receive,
                coin.amount,
                record.timestamp,
                record.confirmed_block_index,
                coin.puzzle_hash,
                record.name(),
            )
        });
        group
            .transactions
            .push(Counterparty::sender(&parent.coin.puzzle_hash, coin.amount, prefix)?);
    }
    Ok(order
        .iter()
        .filter_map(|key| groups.remove(key))
        .map(settle)
        .collect())
}
