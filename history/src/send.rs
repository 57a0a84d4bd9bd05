use crate::error::HistoryError;
use crate::fee::settle;
use crate::lookup::ResolvedSpend;
use crate::models::{Counterparty, GroupType, TransactionGroup};
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;

/// Records that need their spending block resolved.
pub fn is_candidate(record: &CoinRecord) -> bool {
    record.coin.amount != 0 && record.is_spent()
}

pub fn children_of<'a>(
    coin_id: &'a Bytes32,
    additions: &'a [CoinRecord],
) -> impl Iterator<Item = &'a CoinRecord> + 'a {
    additions
        .iter()
        .filter(move |c| c.coin.parent_coin_info == *coin_id)
}

/// Builds the send group of one spent coin. Children paid back to the address
/// are not listed as counterparties; their total is kept in `change`.
pub fn group_send(
    spend: &ResolvedSpend,
    own_puzzle_hash: &Bytes32,
    prefix: &str,
) -> Result<TransactionGroup, HistoryError> {
    let record = &spend.record;
    let name = record.name();
    let mut group = TransactionGroup::new(
        GroupType::Send,
        record.coin.amount,
        spend.block.timestamp.unwrap_or_default(),
        record.spent_block_index,
        record.coin.puzzle_hash,
        name,
    );
    for child in children_of(&name, &spend.additions) {
        let amount = child.coin.amount;
        if amount == 0 {
            continue;
        }
        if child.coin.puzzle_hash == *own_puzzle_hash {
            group.change += u128::from(amount);
        } else {
            group
                .transactions
                .push(Counterparty::destination(&child.coin.puzzle_hash, amount, prefix)?);
        }
    }
    Ok(settle(group))
}

/// One group per spent coin, in the order of `resolved`. Coins spent in the
/// same block are never merged.
pub fn group_sends(
    resolved: &[ResolvedSpend],
    own_puzzle_hash: &Bytes32,
    prefix: &str,
) -> Result<Vec<TransactionGroup>, HistoryError> {
    resolved
        .iter()
        .map(|spend| group_send(spend, own_puzzle_hash, prefix))
        .collect()
}
