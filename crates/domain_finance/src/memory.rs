//! In-memory store implementation
//!
//! Backs the domain test suite and lightweight prototyping. All state sits
//! behind one mutex; the guarded settlement insert holds the lock across the
//! balance check and the push, which gives it the atomicity the
//! [`FinanceStore::insert_settlement`] contract requires.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use core_kernel::{AgentId, BusinessId, DebtId, SettlementId};

use crate::agent::{Agent, Business};
use crate::debt::{AgentDebt, NewDebt};
use crate::settlement::{NewSettlement, Settlement};
use crate::store::{DateRange, DebtTotals, FinanceStore, SettlementTotals, StoreError};

#[derive(Debug, Default)]
struct State {
    agents: HashMap<AgentId, Agent>,
    businesses: HashMap<BusinessId, Business>,
    debts: Vec<AgentDebt>,
    settlements: Vec<Settlement>,
}

impl State {
    fn balance(&self, agent_id: AgentId) -> Decimal {
        let debts: Decimal = self
            .debts
            .iter()
            .filter(|d| d.agent_id == agent_id)
            .map(|d| d.amount)
            .sum();
        let settled: Decimal = self
            .settlements
            .iter()
            .filter(|s| s.agent_id == agent_id)
            .map(|s| s.amount)
            .sum();
        debts - settled
    }
}

/// Mutex-guarded in-memory [`FinanceStore`]
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an agent
    pub fn add_agent(&self, agent: Agent) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.agents.insert(agent.id, agent);
    }

    /// Registers a business
    pub fn add_business(&self, business: Business) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.businesses.insert(business.id, business);
    }

    /// Injects a pre-built debt record, bypassing the port
    ///
    /// Fixture hook for tests that need explicit timestamps.
    pub fn push_debt(&self, debt: AgentDebt) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.debts.push(debt);
    }

    /// Injects a pre-built settlement record, bypassing the port
    pub fn push_settlement(&self, settlement: Settlement) {
        let mut state = self.state.lock().expect("state mutex poisoned");
        state.settlements.push(settlement);
    }

    /// Number of debt rows across all agents
    pub fn debt_count(&self) -> usize {
        self.state.lock().expect("state mutex poisoned").debts.len()
    }

    /// Number of settlement rows across all agents
    pub fn settlement_count(&self) -> usize {
        self.state
            .lock()
            .expect("state mutex poisoned")
            .settlements
            .len()
    }
}

#[async_trait]
impl FinanceStore for InMemoryStore {
    async fn find_agent(&self, id: AgentId) -> Result<Option<Agent>, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        Ok(state.agents.get(&id).cloned())
    }

    async fn find_business(&self, id: BusinessId) -> Result<Option<Business>, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        Ok(state.businesses.get(&id).cloned())
    }

    async fn insert_debt(&self, debt: NewDebt) -> Result<AgentDebt, StoreError> {
        let mut state = self.state.lock().expect("state mutex poisoned");
        let business_name = state
            .businesses
            .get(&debt.business_id)
            .map(|b| b.name.clone())
            .ok_or_else(|| {
                StoreError::Unavailable(format!("business {} missing", debt.business_id))
            })?;

        let record = AgentDebt {
            id: DebtId::new_v7(),
            agent_id: debt.agent_id,
            business_id: debt.business_id,
            business_name,
            amount: debt.amount.value(),
            collection_type: debt.collection_type,
            created_at: Utc::now(),
        };
        state.debts.push(record.clone());
        Ok(record)
    }

    async fn insert_settlement(&self, settlement: NewSettlement) -> Result<Settlement, StoreError> {
        // Check and insert under one lock; racing settlements serialize here.
        let mut state = self.state.lock().expect("state mutex poisoned");

        let available = state.balance(settlement.agent_id);
        let requested = settlement.amount.value();
        if requested > available {
            return Err(StoreError::InsufficientBalance {
                requested,
                available,
            });
        }

        let record = Settlement {
            id: SettlementId::new_v7(),
            agent_id: settlement.agent_id,
            accountant_id: settlement.accountant_id,
            amount: requested,
            notes: settlement.notes,
            created_at: Utc::now(),
        };
        state.settlements.push(record.clone());
        Ok(record)
    }

    async fn sum_debts(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<DebtTotals, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        let mut totals = DebtTotals::default();
        for debt in state
            .debts
            .iter()
            .filter(|d| d.agent_id == agent_id && range.contains(d.created_at))
        {
            totals.total += debt.amount;
            totals.count += 1;
        }
        Ok(totals)
    }

    async fn sum_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<SettlementTotals, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        let total = state
            .settlements
            .iter()
            .filter(|s| s.agent_id == agent_id && range.contains(s.created_at))
            .map(|s| s.amount)
            .sum();
        Ok(SettlementTotals { total })
    }

    async fn list_debts(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<AgentDebt>, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        let mut debts: Vec<AgentDebt> = state
            .debts
            .iter()
            .filter(|d| d.agent_id == agent_id && range.contains(d.created_at))
            .cloned()
            .collect();
        debts.sort_by_key(|d| d.created_at);
        Ok(debts)
    }

    async fn list_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<Settlement>, StoreError> {
        let state = self.state.lock().expect("state mutex poisoned");
        let mut settlements: Vec<Settlement> = state
            .settlements
            .iter()
            .filter(|s| s.agent_id == agent_id && range.contains(s.created_at))
            .cloned()
            .collect();
        settlements.sort_by_key(|s| s.created_at);
        Ok(settlements)
    }
}
