//! Customer domain type.

use chrono::NaiveDate;

use affiliate_crm_core::{AgentId, CustomerId, CustomerStatus, Email};

/// A customer of the affiliate network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: Option<Email>,
    /// The agent working this customer, if any.
    pub assigned_agent: Option<AgentId>,
    pub status: CustomerStatus,
    pub created_at: NaiveDate,
}

impl Customer {
    /// Whether the customer is assigned to `agent`.
    #[must_use]
    pub fn is_assigned_to(&self, agent: &AgentId) -> bool {
        self.assigned_agent.as_ref() == Some(agent)
    }
}
