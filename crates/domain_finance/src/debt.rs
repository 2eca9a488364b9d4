//! Agent debt records
//!
//! A debt record captures cash an agent collected from a business on behalf
//! of the platform. Records are immutable; corrections are out of scope for
//! this core.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, Amount, BusinessId, DebtId};

/// What the collected cash was for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CollectionType {
    /// Directory subscription payment
    Subscription,
    /// Advertisement payment
    AdPayment,
}

impl CollectionType {
    /// Stable string form used in persistence
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::Subscription => "SUBSCRIPTION",
            CollectionType::AdPayment => "AD_PAYMENT",
        }
    }
}

impl TryFrom<&str> for CollectionType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "SUBSCRIPTION" => Ok(CollectionType::Subscription),
            "AD_PAYMENT" => Ok(CollectionType::AdPayment),
            other => Err(format!("unknown collection type '{other}'")),
        }
    }
}

/// An immutable record of cash collected by an agent
///
/// `business_name` is a read-join enrichment supplied by the store; it is
/// never persisted on the debt row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDebt {
    /// Unique identifier
    pub id: DebtId,
    /// Agent who collected the cash
    pub agent_id: AgentId,
    /// Business that paid
    pub business_id: BusinessId,
    /// Display name of the business at read time
    pub business_name: String,
    /// Collected amount, always positive at currency precision
    pub amount: Decimal,
    /// What the payment was for
    pub collection_type: CollectionType,
    /// When the collection was recorded
    pub created_at: DateTime<Utc>,
}

/// Data for recording a new collection
#[derive(Debug, Clone)]
pub struct NewDebt {
    pub agent_id: AgentId,
    pub business_id: BusinessId,
    pub amount: Amount,
    pub collection_type: CollectionType,
}
