//! Test data builders
//!
//! Builders construct ledger records with sensible defaults so tests only
//! spell out the fields they care about. Display names and employee codes
//! default to generated fakes.

use chrono::{DateTime, Utc};
use fake::faker::company::en::CompanyName;
use fake::Fake;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{AgentId, BusinessId, DebtId, SettlementId, UserId};
use domain_finance::{Agent, AgentDebt, Business, CollectionType, Settlement};

use crate::fixtures::TimeFixtures;

/// Builder for [`Agent`] test records
pub struct AgentBuilder {
    id: AgentId,
    employee_code: String,
    user_id: UserId,
    active: bool,
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            id: AgentId::new_v7(),
            employee_code: format!("EMP-{:04}", (1..10_000u16).fake::<u16>()),
            user_id: UserId::new(),
            active: true,
        }
    }

    pub fn with_id(mut self, id: AgentId) -> Self {
        self.id = id;
        self
    }

    pub fn with_employee_code(mut self, code: impl Into<String>) -> Self {
        self.employee_code = code.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn build(self) -> Agent {
        Agent {
            id: self.id,
            employee_code: self.employee_code,
            user_id: self.user_id,
            active: self.active,
        }
    }
}

/// Builder for [`Business`] test records
pub struct BusinessBuilder {
    id: BusinessId,
    name: String,
}

impl Default for BusinessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BusinessBuilder {
    pub fn new() -> Self {
        Self {
            id: BusinessId::new_v7(),
            name: CompanyName().fake(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn build(self) -> Business {
        Business {
            id: self.id,
            name: self.name,
        }
    }
}

/// Builder for [`AgentDebt`] fixture records with explicit timestamps
pub struct DebtBuilder {
    agent_id: AgentId,
    business_id: BusinessId,
    business_name: String,
    amount: Decimal,
    collection_type: CollectionType,
    created_at: DateTime<Utc>,
}

impl DebtBuilder {
    pub fn for_agent(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            business_id: BusinessId::new_v7(),
            business_name: CompanyName().fake(),
            amount: dec!(100.00),
            collection_type: CollectionType::Subscription,
            created_at: TimeFixtures::base(),
        }
    }

    pub fn from_business(mut self, business: &Business) -> Self {
        self.business_id = business.id;
        self.business_name = business.name.clone();
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_collection_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> AgentDebt {
        AgentDebt {
            id: DebtId::new_v7(),
            agent_id: self.agent_id,
            business_id: self.business_id,
            business_name: self.business_name,
            amount: self.amount,
            collection_type: self.collection_type,
            created_at: self.created_at,
        }
    }
}

/// Builder for [`Settlement`] fixture records with explicit timestamps
pub struct SettlementBuilder {
    agent_id: AgentId,
    accountant_id: UserId,
    amount: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl SettlementBuilder {
    pub fn for_agent(agent_id: AgentId) -> Self {
        Self {
            agent_id,
            accountant_id: UserId::new(),
            amount: dec!(50.00),
            notes: None,
            created_at: TimeFixtures::base(),
        }
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn build(self) -> Settlement {
        Settlement {
            id: SettlementId::new_v7(),
            agent_id: self.agent_id,
            accountant_id: self.accountant_id,
            amount: self.amount,
            notes: self.notes,
            created_at: self.created_at,
        }
    }
}
