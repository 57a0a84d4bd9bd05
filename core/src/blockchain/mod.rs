pub mod block_record;
pub mod blockchain_state;
pub mod coin;
pub mod coin_record;
pub mod sized_bytes;
