#[cfg(test)]
mod tests {
    use kiwi_core::blockchain::sized_bytes::Bytes32;
    use kiwi_history::coins::{balance, unspent_coins};
    use kiwi_history::{HistoryError, HistoryOptions};
    use kiwi_tests::{address, puzzle_hash, MemoryLedger};

    const OWN: u8 = 0xa1;
    const OTHER: u8 = 0xb2;

    fn ledger() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        ledger.mint(Bytes32::new([0x01; 32]), puzzle_hash(OWN), u64::MAX, 2);
        ledger.mint(Bytes32::new([0x02; 32]), puzzle_hash(OWN), u64::MAX, 3);
        ledger.mint(Bytes32::new([0x03; 32]), puzzle_hash(OTHER), 77, 3);
        let spent = ledger.mint(Bytes32::new([0x04; 32]), puzzle_hash(OWN), 500, 4);
        ledger.spend(&spent.name(), 8, &[(puzzle_hash(OTHER), 500)]);
        ledger
    }

    #[tokio::test]
    async fn test_unspent_coins() {
        let ledger = ledger();
        let options = HistoryOptions::new("xch", 4).unwrap();
        let utxos = unspent_coins(&ledger, &address(&puzzle_hash(OWN)), &options)
            .await
            .unwrap();
        assert_eq!(utxos.len(), 2);
        assert!(utxos.iter().all(|u| u.puzzle_hash == puzzle_hash(OWN)));
        assert_eq!(utxos[0].amount, u64::MAX.to_string());
        assert_eq!(utxos[0].parent_coin_info, Bytes32::new([0x01; 32]));
        let json = serde_json::to_value(&utxos[0]).unwrap();
        assert_eq!(json["amount"], "18446744073709551615");
    }

    #[tokio::test]
    async fn test_balance_does_not_overflow() {
        let ledger = ledger();
        let options = HistoryOptions::new("xch", 4).unwrap();
        let own = address(&puzzle_hash(OWN));
        let balance = balance(&ledger, &own, &options).await.unwrap();
        assert_eq!(balance.amount, u128::from(u64::MAX) * 2);
        assert_eq!(balance.address, own);
    }

    #[tokio::test]
    async fn test_empty_and_invalid_addresses() {
        let ledger = ledger();
        let options = HistoryOptions::new("xch", 4).unwrap();
        let empty = balance(&ledger, &address(&puzzle_hash(0x33)), &options)
            .await
            .unwrap();
        assert_eq!(empty.amount, 0);
        assert!(matches!(
            unspent_coins(&ledger, "", &options).await,
            Err(HistoryError::InvalidAddress { .. })
        ));
        let mut offline = MemoryLedger::new();
        offline.fail_listing();
        assert!(matches!(
            balance(&offline, &address(&puzzle_hash(OWN)), &options).await,
            Err(HistoryError::CoinListing { .. })
        ));
    }
}
