use crate::error::{AmountInvariantViolation, HistoryError};
use kiwi_core::blockchain::coin_record::CoinRecord;
use kiwi_core::blockchain::sized_bytes::Bytes32;
use kiwi_keys::encode_puzzle_hash;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    Receive,
    Send,
}

/// One visible transfer inside a group. Receives name the sender, sends the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Counterparty {
    Sender { sender: String, amount: u64 },
    Destination { destination: String, amount: u64 },
}

fn encode(puzzle_hash: &Bytes32, prefix: &str) -> Result<String, HistoryError> {
    encode_puzzle_hash(puzzle_hash, prefix).map_err(|e| HistoryError::InvalidPrefix {
        prefix: prefix.to_string(),
        reason: e.to_string(),
    })
}

impl Counterparty {
    pub fn sender(puzzle_hash: &Bytes32, amount: u64, prefix: &str) -> Result<Self, HistoryError> {
        Ok(Counterparty::Sender {
            sender: encode(puzzle_hash, prefix)?,
            amount,
        })
    }

    pub fn destination(
        puzzle_hash: &Bytes32,
        amount: u64,
        prefix: &str,
    ) -> Result<Self, HistoryError> {
        Ok(Counterparty::Destination {
            destination: encode(puzzle_hash, prefix)?,
            amount,
        })
    }

    pub fn amount(&self) -> u64 {
        match self {
            Counterparty::Sender { amount, .. } | Counterparty::Destination { amount, .. } => {
                *amount
            }
        }
    }

    pub fn address(&self) -> &str {
        match self {
            Counterparty::Sender { sender, .. } => sender,
            Counterparty::Destination { destination, .. } => destination,
        }
    }
}

fn is_zero(v: &u128) -> bool {
    *v == 0
}

/// A reconstructed receive or send event anchored on a single coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionGroup {
    #[serde(rename = "type")]
    pub group_type: GroupType,
    pub transactions: Vec<Counterparty>,
    pub timestamp: u64,
    pub block: u32,
    pub amount: u64,
    /// `amount` minus the visible counterparty amounts, see [`crate::fee::settle`].
    pub fee: i128,
    /// Value a send returned to the address itself. Not listed in `transactions`.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub change: u128,
    pub puzzle_hash: Bytes32,
    pub name: Bytes32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integrity_warning: Option<AmountInvariantViolation>,
}

impl TransactionGroup {
    pub fn new(
        group_type: GroupType,
        amount: u64,
        timestamp: u64,
        block: u32,
        puzzle_hash: Bytes32,
        name: Bytes32,
    ) -> Self {
        Self {
            group_type,
            transactions: vec![],
            timestamp,
            block,
            amount,
            fee: i128::from(amount),
            change: 0,
            puzzle_hash,
            name,
            integrity_warning: None,
        }
    }

    pub fn counterparty_total(&self) -> u128 {
        self.transactions
            .iter()
            .map(|t| u128::from(t.amount()))
            .sum()
    }
}

/// A coinbase coin of the address, reported apart from the receive groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmingReward {
    pub name: Bytes32,
    pub amount: u64,
    pub block: u32,
    pub timestamp: u64,
}

impl From<&CoinRecord> for FarmingReward {
    fn from(record: &CoinRecord) -> Self {
        FarmingReward {
            name: record.name(),
            amount: record.coin.amount,
            block: record.confirmed_block_index,
            timestamp: record.timestamp,
        }
    }
}
