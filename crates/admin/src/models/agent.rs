//! Agent domain type.

use chrono::NaiveDate;

use affiliate_crm_core::{AgentId, AgentStatus, Email};

/// An affiliate agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub status: AgentStatus,
    /// Number of customers currently assigned to this agent.
    pub assigned_customers: u32,
    pub created_at: NaiveDate,
}

impl Agent {
    /// Whether the agent can currently be assigned customers.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}
