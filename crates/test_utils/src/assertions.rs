//! Assertion helpers for domain types

use rust_decimal::Decimal;

use domain_finance::{DebtSummary, EntryKind, LedgerEntry};

/// Asserts that ledger entries are non-decreasing by timestamp and that the
/// running balance is internally consistent
pub fn assert_ledger_consistent(entries: &[LedgerEntry]) {
    assert!(
        entries
            .windows(2)
            .all(|w| w[0].created_at <= w[1].created_at),
        "ledger entries out of chronological order"
    );

    let mut balance = Decimal::ZERO;
    for entry in entries {
        match entry.kind {
            EntryKind::Debt => balance += entry.amount,
            EntryKind::Settlement => balance -= entry.amount,
        }
        assert_eq!(
            entry.balance, balance,
            "running balance mismatch at entry {}",
            entry.id
        );
    }
}

/// Asserts the summary's internal arithmetic and the non-negative invariant
pub fn assert_summary_invariants(summary: &DebtSummary) {
    assert_eq!(
        summary.current_balance,
        summary.total_debt - summary.total_settlements,
        "current balance must equal total debt minus total settlements"
    );
    assert!(
        summary.current_balance >= Decimal::ZERO,
        "balance must never go negative"
    );
}
