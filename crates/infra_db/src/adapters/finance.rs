//! PostgreSQL finance store adapter
//!
//! Implements the domain's `FinanceStore` port on top of
//! [`FinanceRepository`], converting rows to domain records and translating
//! database errors into store errors.

use async_trait::async_trait;
use sqlx::PgPool;

use core_kernel::{AgentId, BusinessId, DebtId, SettlementId, UserId};
use domain_finance::{
    Agent, AgentDebt, Business, CollectionType, DateRange, DebtTotals, FinanceStore,
    NewDebt, NewSettlement, Settlement, SettlementTotals, StoreError,
};

use crate::error::DatabaseError;
use crate::repositories::finance::{DebtRow, FinanceRepository, SettlementRow};

/// PostgreSQL-backed implementation of the `FinanceStore` port
#[derive(Debug, Clone)]
pub struct PgFinanceStore {
    repository: FinanceRepository,
}

impl PgFinanceStore {
    /// Creates an adapter over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: FinanceRepository::new(pool),
        }
    }

    /// Returns the underlying repository
    pub fn repository(&self) -> &FinanceRepository {
        &self.repository
    }
}

fn store_error(error: DatabaseError) -> StoreError {
    match error {
        DatabaseError::BalanceExceeded {
            requested,
            available,
        } => StoreError::InsufficientBalance {
            requested,
            available,
        },
        other => StoreError::Unavailable(other.to_string()),
    }
}

fn debt_from_row(row: DebtRow) -> Result<AgentDebt, StoreError> {
    let collection_type =
        CollectionType::try_from(row.collection_type.as_str()).map_err(StoreError::Unavailable)?;
    Ok(AgentDebt {
        id: DebtId::from_uuid(row.id),
        agent_id: AgentId::from_uuid(row.agent_id),
        business_id: BusinessId::from_uuid(row.business_id),
        business_name: row.business_name,
        amount: row.amount,
        collection_type,
        created_at: row.created_at,
    })
}

fn settlement_from_row(row: SettlementRow) -> Settlement {
    Settlement {
        id: SettlementId::from_uuid(row.id),
        agent_id: AgentId::from_uuid(row.agent_id),
        accountant_id: UserId::from_uuid(row.accountant_id),
        amount: row.amount,
        notes: row.notes,
        created_at: row.created_at,
    }
}

#[async_trait]
impl FinanceStore for PgFinanceStore {
    async fn find_agent(&self, id: AgentId) -> Result<Option<Agent>, StoreError> {
        let row = self
            .repository
            .find_agent(*id.as_uuid())
            .await
            .map_err(store_error)?;
        Ok(row.map(|r| Agent {
            id: AgentId::from_uuid(r.id),
            employee_code: r.employee_code,
            user_id: UserId::from_uuid(r.user_id),
            active: r.active,
        }))
    }

    async fn find_business(&self, id: BusinessId) -> Result<Option<Business>, StoreError> {
        let row = self
            .repository
            .find_business(*id.as_uuid())
            .await
            .map_err(store_error)?;
        Ok(row.map(|r| Business {
            id: BusinessId::from_uuid(r.id),
            name: r.name,
        }))
    }

    async fn insert_debt(&self, debt: NewDebt) -> Result<AgentDebt, StoreError> {
        let row = self
            .repository
            .insert_debt(
                *debt.agent_id.as_uuid(),
                *debt.business_id.as_uuid(),
                debt.amount.value(),
                debt.collection_type.as_str(),
            )
            .await
            .map_err(store_error)?;
        debt_from_row(row)
    }

    async fn insert_settlement(&self, settlement: NewSettlement) -> Result<Settlement, StoreError> {
        let row = self
            .repository
            .insert_settlement(
                *settlement.agent_id.as_uuid(),
                *settlement.accountant_id.as_uuid(),
                settlement.amount.value(),
                settlement.notes.as_deref(),
            )
            .await
            .map_err(store_error)?;
        Ok(settlement_from_row(row))
    }

    async fn sum_debts(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<DebtTotals, StoreError> {
        let (total, count) = self
            .repository
            .sum_debts(*agent_id.as_uuid(), range.start, range.end)
            .await
            .map_err(store_error)?;
        Ok(DebtTotals {
            total,
            count: count as u64,
        })
    }

    async fn sum_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<SettlementTotals, StoreError> {
        let total = self
            .repository
            .sum_settlements(*agent_id.as_uuid(), range.start, range.end)
            .await
            .map_err(store_error)?;
        Ok(SettlementTotals { total })
    }

    async fn list_debts(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<AgentDebt>, StoreError> {
        let rows = self
            .repository
            .list_debts(*agent_id.as_uuid(), range.start, range.end)
            .await
            .map_err(store_error)?;
        rows.into_iter().map(debt_from_row).collect()
    }

    async fn list_settlements(
        &self,
        agent_id: AgentId,
        range: DateRange,
    ) -> Result<Vec<Settlement>, StoreError> {
        let rows = self
            .repository
            .list_settlements(*agent_id.as_uuid(), range.start, range.end)
            .await
            .map_err(store_error)?;
        Ok(rows.into_iter().map(settlement_from_row).collect())
    }
}
