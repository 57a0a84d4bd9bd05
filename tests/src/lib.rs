use async_trait::async_trait;
use kiwi_clients::api::full_node::FullnodeAPI;
use kiwi_core::blockchain::block_record::BlockRecord;
use kiwi_core::blockchain::blockchain_state::{BlockchainState, SyncState};
use kiwi_core::blockchain::coin::Coin;
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use kiwi_keys::encode_puzzle_hash;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::io::{Error, ErrorKind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const GENESIS_TIMESTAMP: u64 = 1_616_000_000;

pub fn header_hash(height: u32) -> Bytes32 {
    let mut bytes = [0xbb; 32];
    bytes[..4].copy_from_slice(&height.to_be_bytes());
    Bytes32::new(bytes)
}

pub fn block_timestamp(height: u32) -> u64 {
    GENESIS_TIMESTAMP + u64::from(height) * 52
}

pub fn puzzle_hash(seed: u8) -> Bytes32 {
    Bytes32::new([seed; 32])
}

pub fn address(puzzle_hash: &Bytes32) -> String {
    encode_puzzle_hash(puzzle_hash, "xch").unwrap()
}

#[derive(Default)]
struct InFlight {
    current: AtomicUsize,
    max: AtomicUsize,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.max.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}

struct InFlightGuard<'a>(&'a InFlight);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.exit();
    }
}

/// A full node held in memory. Coins are listed in creation order, blocks
/// appear as coins are minted or spent in them, and any lookup can be made to fail.
#[derive(Default)]
pub struct MemoryLedger {
    coins: Vec<CoinRecord>,
    index: HashMap<Bytes32, usize>,
    blocks: BTreeMap<u32, BlockRecord>,
    failing_coins: HashSet<Bytes32>,
    failing_heights: HashSet<u32>,
    failing_header_hashes: HashSet<Bytes32>,
    fail_listing: bool,
    delayed_coins: HashMap<Bytes32, Duration>,
    calls: AtomicUsize,
    lookups: InFlight,
    delayed_pending: AtomicUsize,
    started_while_delayed: AtomicUsize,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, height: u32) -> BlockRecord {
        self.blocks
            .entry(height)
            .or_insert_with(|| BlockRecord {
                header_hash: header_hash(height),
                prev_hash: header_hash(height.saturating_sub(1)),
                height,
                timestamp: Some(block_timestamp(height)),
                fees: Some(0),
                prev_transaction_block_height: height.saturating_sub(1),
            })
            .clone()
    }

    pub fn non_transaction_block(&mut self, height: u32) {
        let mut block = self.block(height);
        block.timestamp = None;
        block.fees = None;
        self.blocks.insert(height, block);
    }

    fn insert(&mut self, record: CoinRecord) -> CoinRecord {
        self.block(record.confirmed_block_index);
        self.index.insert(record.name(), self.coins.len());
        self.coins.push(record.clone());
        record
    }

    /// Creates a coin at `height`. The parent does not have to exist.
    pub fn mint(&mut self, parent: Bytes32, puzzle_hash: Bytes32, amount: u64, height: u32) -> CoinRecord {
        self.insert(CoinRecord {
            coin: Coin {
                parent_coin_info: parent,
                puzzle_hash,
                amount,
            },
            confirmed_block_index: height,
            spent_block_index: 0,
            timestamp: block_timestamp(height),
            coinbase: false,
            spent: false,
        })
    }

    /// Creates a farming reward, its parent is never resolvable.
    pub fn reward(&mut self, puzzle_hash: Bytes32, amount: u64, height: u32) -> CoinRecord {
        let mut parent = [0xcc; 32];
        parent[28..].copy_from_slice(&height.to_be_bytes());
        self.insert(CoinRecord {
            coin: Coin {
                parent_coin_info: Bytes32::new(parent),
                puzzle_hash,
                amount,
            },
            confirmed_block_index: height,
            spent_block_index: 0,
            timestamp: block_timestamp(height),
            coinbase: true,
            spent: false,
        })
    }

    /// Spends `coin` at `height`, creating one child per `(puzzle_hash, amount)`.
    pub fn spend(&mut self, coin: &Bytes32, height: u32, outputs: &[(Bytes32, u64)]) -> Vec<CoinRecord> {
        let position = self.index[coin];
        self.coins[position].spent = true;
        self.coins[position].spent_block_index = height;
        self.block(height);
        outputs
            .iter()
            .map(|(puzzle_hash, amount)| self.mint(*coin, *puzzle_hash, *amount, height))
            .collect()
    }

    pub fn get(&self, coin: &Bytes32) -> Option<&CoinRecord> {
        self.index.get(coin).map(|i| &self.coins[*i])
    }

    pub fn fail_coin_lookup(&mut self, coin: Bytes32) {
        self.failing_coins.insert(coin);
    }

    pub fn fail_block_lookup(&mut self, height: u32) {
        self.failing_heights.insert(height);
    }

    pub fn fail_additions_lookup(&mut self, height: u32) {
        self.failing_header_hashes.insert(header_hash(height));
    }

    pub fn fail_listing(&mut self) {
        self.fail_listing = true;
    }

    /// Makes every lookup of `coin` by name take `delay`.
    pub fn delay_coin_lookup(&mut self, coin: Bytes32, delay: Duration) {
        self.delayed_coins.insert(coin, delay);
    }

    /// Number of RPC calls answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most parent, block and additions lookups in progress at the same time.
    pub fn max_concurrent_lookups(&self) -> usize {
        self.lookups.max.load(Ordering::SeqCst)
    }

    /// Lookups that started while a delayed coin lookup was pending.
    pub fn lookups_started_while_delayed(&self) -> usize {
        self.started_while_delayed.load(Ordering::SeqCst)
    }

    fn count(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    async fn begin_lookup(&self) -> InFlightGuard<'_> {
        self.count();
        if self.delayed_pending.load(Ordering::SeqCst) > 0 {
            self.started_while_delayed.fetch_add(1, Ordering::SeqCst);
        }
        self.lookups.enter();
        let guard = InFlightGuard(&self.lookups);
        tokio::task::yield_now().await;
        guard
    }
}

#[async_trait]
impl FullnodeAPI for MemoryLedger {
    async fn get_blockchain_state(&self) -> Result<BlockchainState, Error> {
        self.count();
        Ok(BlockchainState {
            peak: self.blocks.values().next_back().cloned(),
            sync: SyncState {
                synced: true,
                ..Default::default()
            },
            difficulty: 1,
            space: 0,
            node_id: None,
        })
    }

    async fn get_block_record_by_height(&self, height: u32) -> Result<BlockRecord, Error> {
        let _in_flight = self.begin_lookup().await;
        if self.failing_heights.contains(&height) {
            return Err(Error::new(
                ErrorKind::TimedOut,
                format!("block {height} timed out"),
            ));
        }
        self.blocks
            .get(&height)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, format!("Height {height} not found")))
    }

    async fn get_additions_and_removals(
        &self,
        header_hash: &Bytes32,
    ) -> Result<(Vec<CoinRecord>, Vec<CoinRecord>), Error> {
        let _in_flight = self.begin_lookup().await;
        if self.failing_header_hashes.contains(header_hash) {
            return Err(Error::new(ErrorKind::ConnectionReset, "connection reset"));
        }
        let block = self
            .blocks
            .values()
            .find(|b| b.header_hash == *header_hash)
            .ok_or_else(|| {
                Error::new(ErrorKind::NotFound, format!("Block {header_hash} not found"))
            })?;
        let additions = self
            .coins
            .iter()
            .filter(|c| c.confirmed_block_index == block.height)
            .cloned()
            .collect();
        let removals = self
            .coins
            .iter()
            .filter(|c| c.is_spent() && c.spent_block_index == block.height)
            .cloned()
            .collect();
        Ok((additions, removals))
    }

    async fn get_coin_records_by_puzzle_hash(
        &self,
        puzzle_hash: &Bytes32,
        include_spent_coins: Option<bool>,
        start_height: Option<u32>,
        end_height: Option<u32>,
    ) -> Result<Vec<CoinRecord>, Error> {
        self.count();
        if self.fail_listing {
            return Err(Error::new(ErrorKind::ConnectionRefused, "node offline"));
        }
        let include_spent = include_spent_coins.unwrap_or(false);
        Ok(self
            .coins
            .iter()
            .filter(|c| c.coin.puzzle_hash == *puzzle_hash)
            .filter(|c| include_spent || !c.is_spent())
            .filter(|c| start_height.map_or(true, |h| c.confirmed_block_index >= h))
            .filter(|c| end_height.map_or(true, |h| c.confirmed_block_index < h))
            .cloned()
            .collect())
    }

    async fn get_coin_record_by_name(&self, name: &Bytes32) -> Result<Option<CoinRecord>, Error> {
        let _in_flight = self.begin_lookup().await;
        if let Some(delay) = self.delayed_coins.get(name) {
            self.delayed_pending.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(*delay).await;
            self.delayed_pending.fetch_sub(1, Ordering::SeqCst);
        }
        if self.failing_coins.contains(name) {
            return Err(Error::new(
                ErrorKind::Other,
                format!("lookup of {name} failed"),
            ));
        }
        Ok(self.get(name).cloned())
    }
}
