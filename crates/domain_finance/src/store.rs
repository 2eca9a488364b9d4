//! Data access port for the finance domain
//!
//! The ledger core never talks to a database directly; everything goes
//! through [`FinanceStore`]. The Postgres adapter lives in `infra_db`, and
//! [`crate::memory::InMemoryStore`] backs tests and prototyping.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{AgentId, BusinessId};

use crate::agent::{Agent, Business};
use crate::debt::{AgentDebt, NewDebt};
use crate::settlement::{NewSettlement, Settlement};

/// Inclusive date bounds applied to ledger queries
///
/// Both bounds are inclusive: `created_at >= start` and `created_at <= end`.
/// The same range is always applied to debt and settlement queries alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// A range with no bounds, covering all records
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A range bounded below
    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// A range bounded on both sides
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Sets the upper bound
    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Whether a timestamp falls inside the range
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start.map_or(true, |start| at >= start) && self.end.map_or(true, |end| at <= end)
    }
}

/// Aggregated debt figures for one agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebtTotals {
    pub total: Decimal,
    pub count: u64,
}

/// Aggregated settlement figures for one agent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettlementTotals {
    pub total: Decimal,
}

/// Errors raised by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The guarded settlement insert found the balance insufficient
    #[error("settlement of {requested} exceeds outstanding balance of {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    /// The underlying store is unreachable or a query failed
    #[error("data store failure: {0}")]
    Unavailable(String),
}

/// Data access boundary of the finance core
///
/// Both persisted tables are append-only from this core's perspective; no
/// update or delete operation exists on the port.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    /// Looks up an agent by id
    async fn find_agent(&self, id: AgentId) -> Result<Option<Agent>, StoreError>;

    /// Looks up a business by id
    async fn find_business(&self, id: BusinessId) -> Result<Option<Business>, StoreError>;

    /// Inserts a debt row, returning it enriched with the business name
    async fn insert_debt(&self, debt: NewDebt) -> Result<AgentDebt, StoreError>;

    /// Inserts a settlement row, guarded against overdraw
    ///
    /// Contract: implementations must re-check the agent's balance and insert
    /// atomically with respect to concurrent settlements for the same agent.
    /// Two racing settlements that would jointly overdraw the balance must
    /// resolve to one success and one [`StoreError::InsufficientBalance`].
    async fn insert_settlement(&self, settlement: NewSettlement) -> Result<Settlement, StoreError>;

    /// Sums debt amounts for an agent within the range
    async fn sum_debts(&self, agent_id: AgentId, range: DateRange)
        -> Result<DebtTotals, StoreError>;

    /// Sums settlement amounts for an agent within the range
    async fn sum_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<SettlementTotals, StoreError>;

    /// Lists debts for an agent within the range, ordered by creation time,
    /// each joined with the business display name
    async fn list_debts(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<AgentDebt>, StoreError>;

    /// Lists settlements for an agent within the range, ordered by creation time
    async fn list_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<Settlement>, StoreError>;
}
