//! Directory entities referenced by the ledger
//!
//! Agents and businesses are owned by other modules of the platform; the
//! ledger only reads them to validate references and to enrich debt records
//! with a display name.

use serde::{Deserialize, Serialize};

use core_kernel::{AgentId, BusinessId, UserId};

/// A field collector who gathers cash payments from businesses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique identifier
    pub id: AgentId,
    /// Employee code assigned at onboarding
    pub employee_code: String,
    /// Platform user account backing this agent
    pub user_id: UserId,
    /// Whether the agent is currently active
    pub active: bool,
}

impl Agent {
    /// Creates an active agent with a fresh identifier
    pub fn new(employee_code: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: AgentId::new_v7(),
            employee_code: employee_code.into(),
            user_id,
            active: true,
        }
    }
}

/// A directory listing that owes or has paid money
///
/// The display name is already denormalized from the listing's translations
/// by the directory module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Business {
    /// Unique identifier
    pub id: BusinessId,
    /// Display name
    pub name: String,
}

impl Business {
    /// Creates a business with a fresh identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BusinessId::new_v7(),
            name: name.into(),
        }
    }
}
