//! Agent repository.

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use affiliate_crm_core::{AgentId, AgentStatus, Email};

use super::{CrmData, RepositoryError, StatusFilter, needle};
use crate::models::Agent;

/// Search and status filter for the agent list.
#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    /// Case-insensitive substring of name or email.
    pub search: Option<String>,
    pub status: StatusFilter<AgentStatus>,
}

impl AgentFilter {
    fn matches(&self, agent: &Agent, needle: Option<&str>) -> bool {
        let matches_search = needle.is_none_or(|n| {
            agent.name.to_lowercase().contains(n) || agent.email.as_str().contains(n)
        });
        matches_search && self.status.matches(&agent.status)
    }
}

/// Fields for a new agent.
#[derive(Debug, Clone)]
pub struct NewAgent {
    pub name: String,
    pub email: Email,
    pub phone: String,
}

/// Editable agent fields.
#[derive(Debug, Clone)]
pub struct AgentUpdate {
    pub name: String,
    pub email: Email,
    pub phone: String,
}

/// Repository for agent operations.
pub struct AgentRepository<'a> {
    data: &'a RwLock<CrmData>,
}

impl<'a> AgentRepository<'a> {
    /// Create a new repository over the shared data set.
    #[must_use]
    pub const fn new(data: &'a RwLock<CrmData>) -> Self {
        Self { data }
    }

    /// Agents matching `filter`, in insertion order.
    pub async fn list(&self, filter: &AgentFilter) -> Vec<Agent> {
        let needle = needle(filter.search.as_deref());
        let data = self.data.read().await;
        data.agents
            .iter()
            .filter(|agent| filter.matches(agent, needle.as_deref()))
            .cloned()
            .collect()
    }

    /// All agents that can take customers.
    pub async fn active(&self) -> Vec<Agent> {
        let filter = AgentFilter {
            search: None,
            status: StatusFilter::Only(AgentStatus::Active),
        };
        self.list(&filter).await
    }

    /// Get an agent by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no agent has this ID.
    pub async fn get(&self, id: &AgentId) -> Result<Agent, RepositoryError> {
        let data = self.data.read().await;
        data.agents
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::agent_not_found(id))
    }

    /// The agent record belonging to a signed-in identity, matched by email.
    pub async fn find_by_email(&self, email: &Email) -> Option<Agent> {
        let data = self.data.read().await;
        data.agents.iter().find(|a| &a.email == email).cloned()
    }

    /// Total and active agent counts.
    pub async fn counts(&self) -> (usize, usize) {
        let data = self.data.read().await;
        let active = data.agents.iter().filter(|a| a.is_active()).count();
        (data.agents.len(), active)
    }

    /// Add an active agent with no customers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if another agent has this email.
    pub async fn create(&self, new: NewAgent) -> Result<Agent, RepositoryError> {
        let mut data = self.data.write().await;
        if data.agents.iter().any(|a| a.email == new.email) {
            return Err(RepositoryError::Conflict(format!(
                "an agent with email {} already exists",
                new.email
            )));
        }

        let agent = Agent {
            id: AgentId::new(format!("agent-{}", Uuid::new_v4().simple())),
            name: new.name,
            email: new.email,
            phone: new.phone,
            status: AgentStatus::Active,
            assigned_customers: 0,
            created_at: Utc::now().date_naive(),
        };
        data.agents.push(agent.clone());

        tracing::info!(agent_id = %agent.id, "Agent created");
        Ok(agent)
    }

    /// Replace an agent's name, email and phone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID and
    /// `RepositoryError::Conflict` if the email belongs to another agent.
    pub async fn update(&self, id: &AgentId, update: AgentUpdate) -> Result<Agent, RepositoryError> {
        let mut data = self.data.write().await;
        if data.agents.iter().any(|a| &a.id != id && a.email == update.email) {
            return Err(RepositoryError::Conflict(format!(
                "an agent with email {} already exists",
                update.email
            )));
        }

        let agent = data
            .agents
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| RepositoryError::agent_not_found(id))?;
        agent.name = update.name;
        agent.email = update.email;
        agent.phone = update.phone;

        tracing::info!(agent_id = %id, "Agent updated");
        Ok(agent.clone())
    }

    /// Flip an agent between active and inactive.
    ///
    /// Existing customer assignments are kept.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` for an unknown ID.
    pub async fn toggle_status(&self, id: &AgentId) -> Result<Agent, RepositoryError> {
        let mut data = self.data.write().await;
        let agent = data
            .agents
            .iter_mut()
            .find(|a| &a.id == id)
            .ok_or_else(|| RepositoryError::agent_not_found(id))?;
        agent.status = agent.status.toggled();

        tracing::info!(agent_id = %id, status = %agent.status, "Agent status changed");
        Ok(agent.clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::CrmDatabase;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let db = CrmDatabase::seeded();
        let filter = AgentFilter {
            search: Some("SARAH".to_string()),
            ..AgentFilter::default()
        };
        let agents = db.agents().list(&filter).await;
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].email.as_str(), "agent@crm.com");

        let by_email = AgentFilter {
            search: Some("Mike@".to_string()),
            ..AgentFilter::default()
        };
        assert_eq!(db.agents().list(&by_email).await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_status_filter() {
        let db = CrmDatabase::seeded();
        let inactive = AgentFilter {
            search: None,
            status: StatusFilter::Only(AgentStatus::Inactive),
        };
        let agents = db.agents().list(&inactive).await;
        assert!(!agents.is_empty());
        assert!(agents.iter().all(|a| a.status == AgentStatus::Inactive));

        let (total, active) = db.agents().counts().await;
        assert_eq!(total, active + agents.len());
    }

    #[tokio::test]
    async fn test_create_agent() {
        let db = CrmDatabase::seeded();
        let (before, _) = db.agents().counts().await;

        let agent = db
            .agents()
            .create(NewAgent {
                name: "Nina Novak".to_string(),
                email: email("nina@crm.com"),
                phone: String::new(),
            })
            .await
            .unwrap();
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.assigned_customers, 0);
        assert_eq!(agent.created_at, Utc::now().date_naive());
        assert_eq!(db.agents().counts().await.0, before + 1);
        assert_eq!(db.agents().get(&agent.id).await.unwrap(), agent);
    }

    #[tokio::test]
    async fn test_create_agent_rejects_duplicate_email() {
        let db = CrmDatabase::seeded();
        let result = db
            .agents()
            .create(NewAgent {
                name: "Another Sarah".to_string(),
                email: email("agent@crm.com"),
                phone: String::new(),
            })
            .await;
        assert!(matches!(result, Err(RepositoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_agent() {
        let db = CrmDatabase::seeded();
        let id = AgentId::new("agent-2");
        let updated = db
            .agents()
            .update(
                &id,
                AgentUpdate {
                    name: "Michael Johnson".to_string(),
                    email: email("michael@crm.com"),
                    phone: "+1 555-0199".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Michael Johnson");
        assert_eq!(db.agents().get(&id).await.unwrap().phone, "+1 555-0199");
    }

    #[tokio::test]
    async fn test_update_unknown_agent() {
        let db = CrmDatabase::seeded();
        let result = db
            .agents()
            .update(
                &AgentId::new("agent-404"),
                AgentUpdate {
                    name: "Nobody".to_string(),
                    email: email("nobody@crm.com"),
                    phone: String::new(),
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_toggle_status_round_trips() {
        let db = CrmDatabase::seeded();
        let id = AgentId::new("agent-1");
        let disabled = db.agents().toggle_status(&id).await.unwrap();
        assert_eq!(disabled.status, AgentStatus::Inactive);
        let enabled = db.agents().toggle_status(&id).await.unwrap();
        assert_eq!(enabled.status, AgentStatus::Active);
    }
}
