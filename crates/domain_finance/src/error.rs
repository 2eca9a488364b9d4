//! Finance domain error types

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{AgentId, BusinessId, MoneyError};

use crate::store::StoreError;

/// Errors surfaced by the finance service
///
/// Callers wrapping this core should map the not-found variants to a
/// "missing entity" response and [`FinanceError::SettlementExceedsBalance`]
/// to a rejection that echoes both figures, so an accountant can correct
/// their input.
#[derive(Debug, Error)]
pub enum FinanceError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("business {0} not found")]
    BusinessNotFound(BusinessId),

    #[error("settlement of {requested} exceeds current debt balance of {available}")]
    SettlementExceedsBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] MoneyError),

    #[error("data store failure: {0}")]
    Store(String),
}

impl FinanceError {
    /// True for the not-found variants
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FinanceError::AgentNotFound(_) | FinanceError::BusinessNotFound(_)
        )
    }
}

impl From<StoreError> for FinanceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::InsufficientBalance {
                requested,
                available,
            } => FinanceError::SettlementExceedsBalance {
                requested,
                available,
            },
            StoreError::Unavailable(message) => FinanceError::Store(message),
        }
    }
}
