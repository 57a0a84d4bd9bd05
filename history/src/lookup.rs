use crate::error::{LookupFailure, LookupStage};
use futures_util::stream::{self, StreamExt};
use kiwi_clients::api::full_node::FullnodeAPI;
use kiwi_core::blockchain::block_record::BlockRecord;
use kiwi_core::blockchain::coin_record::CoinRecord;
use log::{debug, warn};

/// A coin of the address together with the coin that created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParent {
    pub record: CoinRecord,
    pub parent: CoinRecord,
}

/// A spent coin of the address, the block it was spent in, and every coin that block created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpend {
    pub record: CoinRecord,
    pub block: BlockRecord,
    pub additions: Vec<CoinRecord>,
}

pub type Resolution<T> = Result<T, LookupFailure>;

pub async fn resolve_parent<T>(client: &T, record: &CoinRecord) -> Resolution<ResolvedParent>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    let name = record.name();
    let parent_id = record.coin.parent_coin_info;
    debug!("Resolving parent {parent_id} of coin {name}");
    match client.get_coin_record_by_name(&parent_id).await {
        Ok(Some(parent)) => Ok(ResolvedParent {
            record: record.clone(),
            parent,
        }),
        Ok(None) => Err(LookupFailure::new(
            name,
            LookupStage::ParentCoin,
            format!("parent coin {parent_id} not found"),
        )),
        Err(e) => Err(LookupFailure::new(name, LookupStage::ParentCoin, e)),
    }
}

pub async fn resolve_spend<T>(client: &T, record: &CoinRecord) -> Resolution<ResolvedSpend>
where
    T: FullnodeAPI + Sync + ?Sized,
{
    let name = record.name();
    let height = record.spent_block_index;
    debug!("Resolving spend of coin {name} at height {height}");
    let block = client
        .get_block_record_by_height(height)
        .await
        .map_err(|e| LookupFailure::new(name, LookupStage::SpendingBlock, e))?;
    if !block.is_transaction_block() {
        return Err(LookupFailure::new(
            name,
            LookupStage::SpendingBlock,
            format!("block {height} is not a transaction block"),
        ));
    }
    let (additions, _removals) = client
        .get_additions_and_removals(&block.header_hash)
        .await
        .map_err(|e| LookupFailure::new(name, LookupStage::AdditionsRemovals, e))?;
    Ok(ResolvedSpend {
        record: record.clone(),
        block,
        additions,
    })
}

/// One coin's chain of dependent lookups.
#[derive(Debug, Clone, Copy)]
pub enum Unit<'a> {
    Parent(&'a CoinRecord),
    Spend(&'a CoinRecord),
}

enum Outcome {
    Parent(Resolution<ResolvedParent>),
    Spend(Resolution<ResolvedSpend>),
}

async fn resolve_unit<T>(client: &T, unit: Unit<'_>) -> Outcome
where
    T: FullnodeAPI + Sync + ?Sized,
{
    match unit {
        Unit::Parent(record) => Outcome::Parent(resolve_parent(client, record).await),
        Unit::Spend(record) => Outcome::Spend(resolve_spend(client, record).await),
    }
}

#[derive(Debug, Default)]
pub struct Resolutions {
    pub parents: Vec<Resolution<ResolvedParent>>,
    pub spends: Vec<Resolution<ResolvedSpend>>,
}

/// Resolves every unit with at most `limit` of them in progress. A unit issues
/// its lookups one after another, so `limit` also bounds the requests in flight.
/// Units complete in any order; results are returned in the order of `units`.
pub async fn resolve_units<'a, T, I>(client: &T, units: I, limit: usize) -> Resolutions
where
    T: FullnodeAPI + Sync + ?Sized,
    I: IntoIterator<Item = Unit<'a>>,
{
    let mut outcomes: Vec<(usize, Outcome)> = stream::iter(units.into_iter().enumerate())
        .map(|(index, unit)| async move { (index, resolve_unit(client, unit).await) })
        .buffer_unordered(limit.max(1))
        .collect()
        .await;
    outcomes.sort_unstable_by_key(|(index, _)| *index);
    let mut resolutions = Resolutions::default();
    for (_, outcome) in outcomes {
        match outcome {
            Outcome::Parent(r) => resolutions.parents.push(r),
            Outcome::Spend(r) => resolutions.spends.push(r),
        }
    }
    log_failures(&resolutions.parents);
    log_failures(&resolutions.spends);
    resolutions
}

fn log_failures<T>(results: &[Resolution<T>]) {
    for failure in results.iter().filter_map(|r| r.as_ref().err()) {
        warn!("Dropping event: {failure}");
    }
}

/// Splits resolutions into successes and failures, both in their original order.
pub fn partition<T>(results: Vec<Resolution<T>>) -> (Vec<T>, Vec<LookupFailure>) {
    let mut resolved = Vec::with_capacity(results.len());
    let mut failures = vec![];
    for result in results {
        match result {
            Ok(v) => resolved.push(v),
            Err(e) => failures.push(e),
        }
    }
    (resolved, failures)
}
