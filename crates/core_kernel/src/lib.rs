//! Core Kernel - foundational types for the Green Pages finance core
//!
//! This crate provides the building blocks shared by the domain and
//! infrastructure layers:
//! - Monetary amounts with precise decimal arithmetic (never floating point)
//! - Strongly-typed identifiers for ledger entities

pub mod identifiers;
pub mod money;

pub use identifiers::{AgentId, BusinessId, DebtId, SettlementId, UserId};
pub use money::{Amount, MoneyError, CURRENCY_SCALE};
