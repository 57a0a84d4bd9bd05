use crate::blockchain::sized_bytes::Bytes32;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct Coin {
    pub parent_coin_info: Bytes32,
    pub puzzle_hash: Bytes32,
    pub amount: u64,
}

impl Coin {
    #[must_use]
    pub fn name(&self) -> Bytes32 {
        self.coin_id()
    }

    /// sha256(parent_coin_info + puzzle_hash + amount), with the amount in its
    /// minimal signed big-endian form (zero is the empty string).
    #[must_use]
    pub fn coin_id(&self) -> Bytes32 {
        let mut hasher = Sha256::new();
        hasher.update(self.parent_coin_info);
        hasher.update(self.puzzle_hash);
        hasher.update(amount_bytes(self.amount));
        let digest: [u8; 32] = hasher.finalize().into();
        Bytes32::new(digest)
    }
}

fn amount_bytes(amount: u64) -> Vec<u8> {
    if amount == 0 {
        return vec![];
    }
    let be = amount.to_be_bytes();
    let start = (amount.leading_zeros() / 8) as usize;
    let mut rtn = Vec::with_capacity(9);
    // a set high bit would read back as negative
    if be[start] & 0x80 != 0 {
        rtn.push(0);
    }
    rtn.extend_from_slice(&be[start..]);
    rtn
}
