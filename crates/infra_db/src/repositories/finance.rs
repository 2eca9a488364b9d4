//! Finance repository
//!
//! Owns all SQL for the ledger tables. Both tables are append-only; the
//! repository exposes inserts and reads, never updates or deletes. Queries
//! are runtime-checked so the crate builds without a live database.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Repository for the agent-debt and settlement tables
#[derive(Debug, Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    /// Creates a repository over the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up an agent row by id
    pub async fn find_agent(&self, id: Uuid) -> Result<Option<AgentRow>, DatabaseError> {
        sqlx::query_as::<_, AgentRow>(
            "SELECT id, employee_code, user_id, active FROM agent WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Looks up a business row by id
    pub async fn find_business(&self, id: Uuid) -> Result<Option<BusinessRow>, DatabaseError> {
        sqlx::query_as::<_, BusinessRow>("SELECT id, name FROM business WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DatabaseError::classify)
    }

    /// Inserts a debt row and returns it joined with the business name
    #[instrument(skip(self))]
    pub async fn insert_debt(
        &self,
        agent_id: Uuid,
        business_id: Uuid,
        amount: Decimal,
        collection_type: &str,
    ) -> Result<DebtRow, DatabaseError> {
        sqlx::query_as::<_, DebtRow>(
            r#"
            WITH inserted AS (
                INSERT INTO agent_debt (id, agent_id, business_id, amount, collection_type, created_at)
                VALUES ($1, $2, $3, $4, $5, now())
                RETURNING id, agent_id, business_id, amount, collection_type, created_at
            )
            SELECT i.id, i.agent_id, i.business_id, b.name AS business_name,
                   i.amount, i.collection_type, i.created_at
            FROM inserted i
            JOIN business b ON b.id = i.business_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(agent_id)
        .bind(business_id)
        .bind(amount)
        .bind(collection_type)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Inserts a settlement row, guarded against overdrawing the balance
    ///
    /// The agent row is locked (`FOR UPDATE`) for the duration of the
    /// transaction, serializing concurrent settlements for the same agent;
    /// the balance is then re-aggregated and the insert only proceeds when
    /// the requested amount fits. Racing requests that no longer fit get
    /// [`DatabaseError::BalanceExceeded`].
    #[instrument(skip(self, notes))]
    pub async fn insert_settlement(
        &self,
        agent_id: Uuid,
        accountant_id: Uuid,
        amount: Decimal,
        notes: Option<&str>,
    ) -> Result<SettlementRow, DatabaseError> {
        let mut tx = self.pool.begin().await.map_err(DatabaseError::classify)?;

        let locked: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM agent WHERE id = $1 FOR UPDATE")
                .bind(agent_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(DatabaseError::classify)?;
        if locked.is_none() {
            return Err(DatabaseError::not_found("Agent", agent_id));
        }

        let (total_debt,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM agent_debt WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::classify)?;

        let (total_settled,): (Decimal,) = sqlx::query_as(
            "SELECT COALESCE(SUM(amount), 0) FROM settlement WHERE agent_id = $1",
        )
        .bind(agent_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::classify)?;

        let available = total_debt - total_settled;
        if amount > available {
            // Dropping the transaction rolls back the row lock.
            return Err(DatabaseError::BalanceExceeded {
                requested: amount,
                available,
            });
        }

        let row = sqlx::query_as::<_, SettlementRow>(
            r#"
            INSERT INTO settlement (id, agent_id, accountant_id, amount, notes, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING id, agent_id, accountant_id, amount, notes, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(agent_id)
        .bind(accountant_id)
        .bind(amount)
        .bind(notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::classify)?;

        tx.commit().await.map_err(DatabaseError::classify)?;
        Ok(row)
    }

    /// Sums debt amounts and counts rows for an agent within the range
    pub async fn sum_debts(
        &self,
        agent_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<(Decimal, i64), DatabaseError> {
        sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0), COUNT(*)
            FROM agent_debt
            WHERE agent_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            "#,
        )
        .bind(agent_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Sums settlement amounts for an agent within the range
    pub async fn sum_settlements(
        &self,
        agent_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Decimal, DatabaseError> {
        let (total,): (Decimal,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM settlement
            WHERE agent_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            "#,
        )
        .bind(agent_id)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::classify)?;
        Ok(total)
    }

    /// Lists debt rows for an agent within the range, business name joined in
    pub async fn list_debts(
        &self,
        agent_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<DebtRow>, DatabaseError> {
        sqlx::query_as::<_, DebtRow>(
            r#"
            SELECT d.id, d.agent_id, d.business_id, b.name AS business_name,
                   d.amount, d.collection_type, d.created_at
            FROM agent_debt d
            JOIN business b ON b.id = d.business_id
            WHERE d.agent_id = $1
              AND ($2::timestamptz IS NULL OR d.created_at >= $2)
              AND ($3::timestamptz IS NULL OR d.created_at <= $3)
            ORDER BY d.created_at, d.id
            "#,
        )
        .bind(agent_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }

    /// Lists settlement rows for an agent within the range
    pub async fn list_settlements(
        &self,
        agent_id: Uuid,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<SettlementRow>, DatabaseError> {
        sqlx::query_as::<_, SettlementRow>(
            r#"
            SELECT id, agent_id, accountant_id, amount, notes, created_at
            FROM settlement
            WHERE agent_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at <= $3)
            ORDER BY created_at, id
            "#,
        )
        .bind(agent_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::classify)
    }
}

/// Database row for an agent
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AgentRow {
    pub id: Uuid,
    pub employee_code: String,
    pub user_id: Uuid,
    pub active: bool,
}

/// Database row for a business
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
    pub id: Uuid,
    pub name: String,
}

/// Database row for a debt record, joined with the business name
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DebtRow {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub business_id: Uuid,
    pub business_name: String,
    pub amount: Decimal,
    pub collection_type: String,
    pub created_at: DateTime<Utc>,
}

/// Database row for a settlement record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SettlementRow {
    pub id: Uuid,
    pub agent_id: Uuid,
    pub accountant_id: Uuid,
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
