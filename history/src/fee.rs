use crate::error::AmountInvariantViolation;
use crate::models::{Counterparty, TransactionGroup};
use log::warn;

/// `amount - sum(counterparty amounts)`, folded in `i128` so it can neither
/// overflow nor hide a negative result.
pub fn compute_fee(amount: u64, transactions: &[Counterparty]) -> i128 {
    transactions
        .iter()
        .fold(i128::from(amount), |fee, t| fee - i128::from(t.amount()))
}

/// Computes the final fee of a fully accumulated group and attaches an
/// [`AmountInvariantViolation`] when it comes out negative.
pub fn settle(mut group: TransactionGroup) -> TransactionGroup {
    group.fee = compute_fee(group.amount, &group.transactions);
    group.integrity_warning = if group.fee < 0 {
        let violation = AmountInvariantViolation {
            name: group.name,
            amount: group.amount,
            counterparty_total: group.counterparty_total(),
            fee: group.fee,
        };
        warn!("{violation}");
        Some(violation)
    } else {
        None
    };
    group
}
