//! Settlement records
//!
//! A settlement captures an agent handing previously collected cash to an
//! accountant. Like debts, settlements are immutable once written.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, Amount, SettlementId, UserId};

/// An immutable record of cash handed over to an accountant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settlement {
    /// Unique identifier
    pub id: SettlementId,
    /// Agent who settled
    pub agent_id: AgentId,
    /// Accountant who received the cash
    pub accountant_id: UserId,
    /// Settled amount, positive and never exceeding the balance at creation
    pub amount: Decimal,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// When the settlement was recorded
    pub created_at: DateTime<Utc>,
}

/// Data for processing a new settlement
#[derive(Debug, Clone)]
pub struct NewSettlement {
    pub agent_id: AgentId,
    pub accountant_id: UserId,
    pub amount: Amount,
    pub notes: Option<String>,
}

impl NewSettlement {
    pub fn new(agent_id: AgentId, accountant_id: UserId, amount: Amount) -> Self {
        Self {
            agent_id,
            accountant_id,
            amount,
            notes: None,
        }
    }

    /// Attaches free-text notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
