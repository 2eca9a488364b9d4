//! Finance Domain - Agent Debt & Settlement Ledger
//!
//! This crate implements the settlement ledger for the Green Pages directory
//! platform. Field agents collect cash from businesses (subscription and ad
//! payments); each collection becomes an immutable [`AgentDebt`] record. When
//! an agent hands collected cash to an accountant, an immutable [`Settlement`]
//! record reduces their outstanding balance.
//!
//! # Invariants
//!
//! - Debt and settlement records are append-only; corrections are new records
//! - An agent's balance is always derived, never stored
//! - For every agent, at all times, total settlements never exceed total
//!   debts: the balance cannot go negative. The balance check and the
//!   settlement insert are atomic with respect to concurrent settlements for
//!   the same agent (see [`FinanceStore::insert_settlement`])
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_finance::{FinanceService, InMemoryStore, CollectionType, DateRange};
//!
//! let service = FinanceService::new(Arc::new(store));
//!
//! let debt = service
//!     .record_collection(agent_id, business_id, amount, CollectionType::Subscription)
//!     .await?;
//!
//! let ledger = service.agent_ledger(agent_id, DateRange::unbounded()).await?;
//! ```

pub mod agent;
pub mod balance;
pub mod debt;
pub mod error;
pub mod ledger;
pub mod memory;
pub mod service;
pub mod settlement;
pub mod store;

pub use agent::{Agent, Business};
pub use balance::DebtSummary;
pub use debt::{AgentDebt, CollectionType, NewDebt};
pub use error::FinanceError;
pub use ledger::{build_ledger, EntryKind, LedgerEntry};
pub use memory::InMemoryStore;
pub use service::FinanceService;
pub use settlement::{NewSettlement, Settlement};
pub use store::{DateRange, DebtTotals, FinanceStore, SettlementTotals, StoreError};
