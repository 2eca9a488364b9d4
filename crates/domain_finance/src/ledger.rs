//! Ledger builder
//!
//! Merges an agent's debts and settlements into one chronologically ordered
//! transaction history annotated with a running balance. Because records are
//! append-only, the unranged ledger is a globally consistent audit trail.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::UserId;

use crate::debt::{AgentDebt, CollectionType};
use crate::settlement::Settlement;

/// Which table a ledger entry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    Debt,
    Settlement,
}

/// One row of the merged transaction history
///
/// Debt-only fields (`business_name`, `collection_type`) and settlement-only
/// fields (`accountant_id`, `notes`) are optional depending on the kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Identifier of the underlying debt or settlement record
    pub id: Uuid,
    /// Record kind
    pub kind: EntryKind,
    /// The record's own amount, always positive
    pub amount: Decimal,
    /// Running balance after applying this entry
    pub balance: Decimal,
    /// Business display name (debts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    /// Collection type (debts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<CollectionType>,
    /// Receiving accountant (settlements only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accountant_id: Option<UserId>,
    /// Free-text notes (settlements only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    fn from_debt(debt: AgentDebt) -> Self {
        Self {
            id: *debt.id.as_uuid(),
            kind: EntryKind::Debt,
            amount: debt.amount,
            balance: Decimal::ZERO,
            business_name: Some(debt.business_name),
            collection_type: Some(debt.collection_type),
            accountant_id: None,
            notes: None,
            created_at: debt.created_at,
        }
    }

    fn from_settlement(settlement: Settlement) -> Self {
        Self {
            id: *settlement.id.as_uuid(),
            kind: EntryKind::Settlement,
            amount: settlement.amount,
            balance: Decimal::ZERO,
            business_name: None,
            collection_type: None,
            accountant_id: Some(settlement.accountant_id),
            notes: settlement.notes,
            created_at: settlement.created_at,
        }
    }

    /// Signed effect of this entry on the balance
    fn balance_change(&self) -> Decimal {
        match self.kind {
            EntryKind::Debt => self.amount,
            EntryKind::Settlement => -self.amount,
        }
    }
}

/// Merges debts and settlements into a running-balance history
///
/// Entries are ordered ascending by creation timestamp; entries with equal
/// timestamps are ordered by record id. Record ids are time-ordered UUIDs
/// (v7), so for application-written rows this matches insertion order while
/// staying deterministic.
///
/// The running balance starts at zero for whatever set of records is passed
/// in. When the caller has filtered by a date range, the balance is relative
/// to the window, not the agent's all-time balance; callers that need the
/// absolute figure use the balance calculator over the full history.
pub fn build_ledger(debts: Vec<AgentDebt>, settlements: Vec<Settlement>) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = debts
        .into_iter()
        .map(LedgerEntry::from_debt)
        .chain(settlements.into_iter().map(LedgerEntry::from_settlement))
        .collect();

    entries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let mut balance = Decimal::ZERO;
    for entry in &mut entries {
        balance += entry.balance_change();
        entry.balance = balance;
    }

    entries
}
