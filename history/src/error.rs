use kiwi_core::blockchain::sized_bytes::Bytes32;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{Error, ErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("Invalid Address ({address}): {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("Invalid address prefix ({prefix}): {reason}")]
    InvalidPrefix { prefix: String, reason: String },
    #[error("Failed to list coins for {address}: {source}")]
    CoinListing {
        address: String,
        #[source]
        source: Error,
    },
}

impl From<HistoryError> for Error {
    fn from(value: HistoryError) -> Self {
        let kind = match &value {
            HistoryError::InvalidAddress { .. } | HistoryError::InvalidPrefix { .. } => {
                ErrorKind::InvalidInput
            }
            HistoryError::CoinListing { source, .. } => source.kind(),
        };
        Error::new(kind, value.to_string())
    }
}

/// The dependent lookup a unit of work was waiting on when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStage {
    ParentCoin,
    SpendingBlock,
    AdditionsRemovals,
}

impl fmt::Display for LookupStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LookupStage::ParentCoin => "parent coin",
            LookupStage::SpendingBlock => "spending block",
            LookupStage::AdditionsRemovals => "additions/removals",
        })
    }
}

/// A single coin whose event was dropped from the history.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{stage} lookup failed for coin {coin}: {reason}")]
pub struct LookupFailure {
    pub coin: Bytes32,
    pub stage: LookupStage,
    pub reason: String,
}

impl LookupFailure {
    pub fn new(coin: Bytes32, stage: LookupStage, reason: impl fmt::Display) -> Self {
        Self {
            coin,
            stage,
            reason: reason.to_string(),
        }
    }
}

/// Reported alongside a group whose counterparties add up to more than its amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("negative fee {fee} for coin {name}: amount {amount}, counterparties total {counterparty_total}")]
pub struct AmountInvariantViolation {
    pub name: Bytes32,
    pub amount: u64,
    pub counterparty_total: u128,
    pub fee: i128,
}
