//! Finance service
//!
//! Orchestrates the four ledger operations over an injected [`FinanceStore`].
//! The store handle is passed in explicitly; there is no process-wide
//! singleton.

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::{AgentId, Amount, BusinessId, UserId};

use crate::agent::Agent;
use crate::balance::{summarize, DebtSummary};
use crate::debt::{AgentDebt, CollectionType, NewDebt};
use crate::error::FinanceError;
use crate::ledger::{build_ledger, LedgerEntry};
use crate::settlement::{NewSettlement, Settlement};
use crate::store::{DateRange, FinanceStore};

/// Application service for the agent-debt / settlement ledger
#[derive(Clone)]
pub struct FinanceService {
    store: Arc<dyn FinanceStore>,
}

impl FinanceService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn FinanceStore>) -> Self {
        Self { store }
    }

    /// Records cash collected by an agent from a business
    ///
    /// Inserts a single debt row timestamped now; no other entity is touched.
    /// The returned record carries the business display name for immediate
    /// feedback - a read-join, not a stored field.
    ///
    /// # Errors
    ///
    /// - [`FinanceError::AgentNotFound`] / [`FinanceError::BusinessNotFound`]
    ///   if a reference does not resolve
    /// - [`FinanceError::Store`] if the store fails
    #[instrument(skip(self), fields(agent = %agent_id, business = %business_id, amount = %amount))]
    pub async fn record_collection(
        &self,
        agent_id: AgentId,
        business_id: BusinessId,
        amount: Amount,
        collection_type: CollectionType,
    ) -> Result<AgentDebt, FinanceError> {
        self.require_agent(agent_id).await?;
        self.store
            .find_business(business_id)
            .await?
            .ok_or(FinanceError::BusinessNotFound(business_id))?;

        let debt = self
            .store
            .insert_debt(NewDebt {
                agent_id,
                business_id,
                amount,
                collection_type,
            })
            .await?;

        debug!(debt = %debt.id, "recorded cash collection");
        Ok(debt)
    }

    /// Processes a settlement, reducing the agent's outstanding balance
    ///
    /// The settlement amount must not exceed the agent's current balance.
    /// Over-amount requests are rejected outright, never clamped, and no
    /// partial settlement is written. The pre-check here produces the
    /// offered-vs-available error without opening a transaction; the store's
    /// guarded insert re-validates atomically, so concurrent settlements for
    /// the same agent cannot jointly overdraw the balance.
    ///
    /// # Errors
    ///
    /// - [`FinanceError::AgentNotFound`] if the agent does not exist
    /// - [`FinanceError::SettlementExceedsBalance`] if the amount is over the
    ///   current balance (echoing both figures)
    /// - [`FinanceError::Store`] if the store fails
    #[instrument(skip(self, notes), fields(agent = %agent_id, amount = %amount))]
    pub async fn process_settlement(
        &self,
        agent_id: AgentId,
        accountant_id: UserId,
        amount: Amount,
        notes: Option<String>,
    ) -> Result<Settlement, FinanceError> {
        self.require_agent(agent_id).await?;

        let summary = self.summary(agent_id).await?;
        if amount.value() > summary.current_balance {
            return Err(FinanceError::SettlementExceedsBalance {
                requested: amount.value(),
                available: summary.current_balance,
            });
        }

        let mut new_settlement = NewSettlement::new(agent_id, accountant_id, amount);
        new_settlement.notes = notes;

        let settlement = self.store.insert_settlement(new_settlement).await?;

        debug!(settlement = %settlement.id, "processed settlement");
        Ok(settlement)
    }

    /// Returns the agent's current debt summary
    ///
    /// A pure read that re-aggregates on every call; agents with no records
    /// get an all-zero summary, not an error.
    #[instrument(skip(self), fields(agent = %agent_id))]
    pub async fn agent_debt(&self, agent_id: AgentId) -> Result<DebtSummary, FinanceError> {
        self.require_agent(agent_id).await?;
        self.summary(agent_id).await
    }

    /// Returns the agent's chronological transaction history
    ///
    /// Debts and settlements within the inclusive date range are merged
    /// ascending by creation time and annotated with a running balance that
    /// starts at zero for the window. A windowed ledger therefore does not
    /// show the all-time balance; use [`FinanceService::agent_debt`] for that.
    #[instrument(skip(self), fields(agent = %agent_id))]
    pub async fn agent_ledger(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<LedgerEntry>, FinanceError> {
        self.require_agent(agent_id).await?;

        let debts = self.store.list_debts(agent_id, range).await?;
        let settlements = self.store.list_settlements(agent_id, range).await?;

        Ok(build_ledger(debts, settlements))
    }

    async fn require_agent(&self, agent_id: AgentId) -> Result<Agent, FinanceError> {
        self.store
            .find_agent(agent_id)
            .await?
            .ok_or(FinanceError::AgentNotFound(agent_id))
    }

    async fn summary(&self, agent_id: AgentId) -> Result<DebtSummary, FinanceError> {
        let debts = self.store.sum_debts(agent_id, DateRange::unbounded()).await?;
        let settlements = self
            .store
            .sum_settlements(agent_id, DateRange::unbounded())
            .await?;
        Ok(summarize(agent_id, debts, settlements))
    }
}
