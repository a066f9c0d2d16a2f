//! In-memory CRM data set.
//!
//! There is no database. Agents, customers and orders live in a single
//! [`CrmData`] value shared across requests behind a `tokio` `RwLock`.
//! Each repository method takes the lock once, so a mutation is observed
//! either completely or not at all.
//!
//! # Repositories
//!
//! - [`AgentRepository`] - agent listing, creation, edits, status toggles
//! - [`CustomerRepository`] - role-scoped listing and agent assignment
//! - [`OrderRepository`] - recent orders, statistics, order creation

pub mod agents;
pub mod customers;
pub mod fixtures;
pub mod orders;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use affiliate_crm_core::{AgentId, CustomerId};

pub use agents::{AgentFilter, AgentRepository, AgentUpdate, NewAgent};
pub use customers::{CustomerFilter, CustomerRepository, CustomerScope, NewCustomer};
pub use orders::{OrderCustomer, OrderDraft, OrderRepository, OrderStats};

use crate::models::{Agent, Customer, Order};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Customers can only be assigned to active agents.
    #[error("agent {0} is inactive")]
    InactiveAgent(AgentId),

    /// An agent tried to use a customer assigned elsewhere.
    #[error("customer {customer} is not assigned to agent {agent}")]
    NotAssigned { customer: CustomerId, agent: AgentId },
}

impl RepositoryError {
    pub(crate) fn agent_not_found(id: &AgentId) -> Self {
        Self::NotFound {
            entity: "agent",
            id: id.to_string(),
        }
    }

    pub(crate) fn customer_not_found(id: &CustomerId) -> Self {
        Self::NotFound {
            entity: "customer",
            id: id.to_string(),
        }
    }
}

/// Status filter used by list views: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq + std::str::FromStr> StatusFilter<T> {
    /// Parse a query value; `all`, empty and unknown values mean [`Self::All`].
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .filter(|s| !s.is_empty() && *s != "all")
            .and_then(|s| s.parse().ok())
            .map_or(Self::All, Self::Only)
    }

    /// Whether `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Lower-cased search needle, or `None` for an empty query.
pub(crate) fn needle(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
}

/// Every record the dashboard knows about.
#[derive(Debug, Clone, Default)]
pub struct CrmData {
    pub agents: Vec<Agent>,
    pub customers: Vec<Customer>,
    /// Newest first.
    pub orders: Vec<Order>,
}

/// Shared handle to the CRM data set.
#[derive(Debug, Clone, Default)]
pub struct CrmDatabase {
    data: Arc<RwLock<CrmData>>,
}

impl CrmDatabase {
    /// Wrap an existing data set.
    #[must_use]
    pub fn new(data: CrmData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
        }
    }

    /// A database pre-populated with the demo fixtures.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(fixtures::seed())
    }

    #[must_use]
    pub fn agents(&self) -> AgentRepository<'_> {
        AgentRepository::new(&self.data)
    }

    #[must_use]
    pub fn customers(&self) -> CustomerRepository<'_> {
        CustomerRepository::new(&self.data)
    }

    #[must_use]
    pub fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(&self.data)
    }
}

#[cfg(test)]
mod tests {
    use affiliate_crm_core::AgentStatus;

    use super::*;

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::<AgentStatus>::parse(None), StatusFilter::All);
        assert_eq!(StatusFilter::<AgentStatus>::parse(Some("all")), StatusFilter::All);
        assert_eq!(StatusFilter::<AgentStatus>::parse(Some("bogus")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse(Some("inactive")),
            StatusFilter::Only(AgentStatus::Inactive)
        );
    }

    #[test]
    fn test_needle() {
        assert_eq!(needle(None), None);
        assert_eq!(needle(Some("   ")), None);
        assert_eq!(needle(Some(" SaRa ")).as_deref(), Some("sara"));
    }
}
