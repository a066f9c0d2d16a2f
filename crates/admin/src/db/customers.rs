//! Customer repository.

use tokio::sync::RwLock;

use affiliate_crm_core::{AgentId, CustomerId, CustomerStatus};

use super::{CrmData, RepositoryError, StatusFilter, needle};
use crate::models::{Agent, Customer};

/// Which customers a viewer may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerScope {
    /// Every customer (admins).
    All,
    /// Only customers assigned to this agent.
    AssignedTo(AgentId),
    /// Nothing (an agent identity without an agent record).
    Nobody,
}

impl CustomerScope {
    fn includes(&self, customer: &Customer) -> bool {
        match self {
            Self::All => true,
            Self::AssignedTo(agent) => customer.is_assigned_to(agent),
            Self::Nobody => false,
        }
    }
}

/// Search and status filter for the customer list.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive substring of the name, or substring of the phone.
    pub search: Option<String>,
    pub status: StatusFilter<CustomerStatus>,
}

impl CustomerFilter {
    fn matches(&self, customer: &Customer, needle: Option<&str>) -> bool {
        let matches_search = needle.is_none_or(|n| {
            customer.name.to_lowercase().contains(n) || customer.phone.contains(n)
        });
        matches_search && self.status.matches(&customer.status)
    }
}

/// Fields for a customer created while placing an order.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
}

/// Repository for customer operations.
pub struct CustomerRepository<'a> {
    data: &'a RwLock<CrmData>,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new repository over the shared data set.
    #[must_use]
    pub const fn new(data: &'a RwLock<CrmData>) -> Self {
        Self { data }
    }

    /// Customers visible in `scope` that match `filter`.
    pub async fn list(&self, scope: &CustomerScope, filter: &CustomerFilter) -> Vec<Customer> {
        let needle = needle(filter.search.as_deref());
        let data = self.data.read().await;
        data.customers
            .iter()
            .filter(|c| scope.includes(c) && filter.matches(c, needle.as_deref()))
            .cloned()
            .collect()
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no customer has this ID.
    pub async fn get(&self, id: &CustomerId) -> Result<Customer, RepositoryError> {
        let data = self.data.read().await;
        data.customers
            .iter()
            .find(|c| &c.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::customer_not_found(id))
    }

    /// Number of customers in `scope`, and how many of them are active.
    pub async fn counts(&self, scope: &CustomerScope) -> (usize, usize) {
        let data = self.data.read().await;
        let visible: Vec<&Customer> = data.customers.iter().filter(|c| scope.includes(c)).collect();
        let active = visible
            .iter()
            .filter(|c| c.status == CustomerStatus::Active)
            .count();
        (visible.len(), active)
    }

    /// Assign a customer to `agent`, or unassign it with `None`.
    ///
    /// Keeps `assigned_customers` of the previous and the new agent in sync.
    /// Returns the updated customer and the agent it is now assigned to.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown customer or agent
    /// and `RepositoryError::InactiveAgent` for a disabled agent.
    pub async fn assign(
        &self,
        id: &CustomerId,
        agent: Option<&AgentId>,
    ) -> Result<(Customer, Option<Agent>), RepositoryError> {
        let mut data = self.data.write().await;

        let target = match agent {
            Some(agent_id) => {
                let agent = data
                    .agents
                    .iter()
                    .find(|a| &a.id == agent_id)
                    .ok_or_else(|| RepositoryError::agent_not_found(agent_id))?;
                if !agent.is_active() {
                    return Err(RepositoryError::InactiveAgent(agent_id.clone()));
                }
                Some(agent_id.clone())
            }
            None => None,
        };

        let customer = data
            .customers
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| RepositoryError::customer_not_found(id))?;
        let previous = std::mem::replace(&mut customer.assigned_agent, target.clone());
        let customer = customer.clone();

        if previous != target {
            for agent in &mut data.agents {
                if previous.as_ref() == Some(&agent.id) {
                    agent.assigned_customers = agent.assigned_customers.saturating_sub(1);
                }
                if target.as_ref() == Some(&agent.id) {
                    agent.assigned_customers += 1;
                }
            }
        }

        let assigned = target.and_then(|t| data.agents.iter().find(|a| a.id == t).cloned());

        tracing::info!(
            customer_id = %id,
            agent_id = ?assigned.as_ref().map(|a| a.id.as_str()),
            "Customer assignment changed"
        );
        Ok((customer, assigned))
    }
}

/// Insert a new pending customer assigned to `agent`, updating its count.
///
/// Runs under a write lock held by the caller.
pub(crate) fn insert_customer(data: &mut CrmData, new: NewCustomer, agent: &AgentId) -> Customer {
    let customer = Customer {
        id: CustomerId::new(format!("cust-{}", uuid::Uuid::new_v4().simple())),
        name: new.name,
        phone: new.phone,
        email: None,
        assigned_agent: Some(agent.clone()),
        status: CustomerStatus::Pending,
        created_at: chrono::Utc::now().date_naive(),
    };
    data.customers.push(customer.clone());

    if let Some(agent) = data.agents.iter_mut().find(|a| &a.id == agent) {
        agent.assigned_customers += 1;
    }
    customer
}
