//! Send/receive history for a single address, rebuilt from the coin records a
//! full node keeps for its puzzle hash.
//!
//! The node only knows coins. A receive is a coin of the address whose parent
//! belongs to someone else; coins created by the same parent form one event.
//! A send is a spent coin of the address together with the children it
//! created in its spending block. Every event carries a `fee`, the part of the
//! anchoring coin's amount not accounted for by the listed counterparties.

pub mod coins;
pub mod error;
pub mod fee;
pub mod history;
pub mod lookup;
pub mod models;
pub mod receive;
pub mod send;

pub use error::{AmountInvariantViolation, HistoryError, LookupFailure, LookupStage};
pub use history::{reconstruct_history, HistoryOptions, TransactionHistory};
pub use models::{Counterparty, FarmingReward, GroupType, TransactionGroup};
