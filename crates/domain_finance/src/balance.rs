//! Balance calculation
//!
//! An agent's balance is derived on every call from the full set of debt and
//! settlement totals; nothing is cached and no denormalized balance field
//! exists anywhere in the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::AgentId;

use crate::store::{DebtTotals, SettlementTotals};

/// Per-agent aggregate of debts and settlements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSummary {
    /// The agent this summary describes
    pub agent_id: AgentId,
    /// Sum of all debt amounts
    pub total_debt: Decimal,
    /// Number of debt records
    pub debt_count: u64,
    /// Sum of all settlement amounts
    pub total_settlements: Decimal,
    /// total_debt - total_settlements, never negative
    pub current_balance: Decimal,
}

/// Combines debt and settlement totals into a summary
///
/// Agents with no records produce all-zero totals rather than an error.
pub fn summarize(
    agent_id: AgentId,
    debts: DebtTotals,
    settlements: SettlementTotals,
) -> DebtSummary {
    DebtSummary {
        agent_id,
        total_debt: debts.total,
        debt_count: debts.count,
        total_settlements: settlements.total,
        current_balance: debts.total - settlements.total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_summarize() {
        let summary = summarize(
            AgentId::new(),
            DebtTotals {
                total: dec!(150.00),
                count: 2,
            },
            SettlementTotals {
                total: dec!(30.00),
            },
        );

        assert_eq!(summary.total_debt, dec!(150.00));
        assert_eq!(summary.debt_count, 2);
        assert_eq!(summary.total_settlements, dec!(30.00));
        assert_eq!(summary.current_balance, dec!(120.00));
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(AgentId::new(), DebtTotals::default(), SettlementTotals::default());

        assert_eq!(summary.total_debt, Decimal::ZERO);
        assert_eq!(summary.debt_count, 0);
        assert_eq!(summary.current_balance, Decimal::ZERO);
    }
}
