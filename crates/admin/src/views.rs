//! Role-dependent view selection.
//!
//! Everything here is a pure function of the viewer's [`Role`] (plus data
//! already loaded), so pages differ by role without branching in templates.

use chrono::Timelike;

use affiliate_crm_core::{Identity, Role};

use crate::db::{CustomerScope, OrderStats};
use crate::models::Agent;

// =============================================================================
// Navigation
// =============================================================================

/// A sidebar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    roles: &'static [Role],
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        path: "/dashboard",
        roles: &[Role::Admin, Role::Agent],
    },
    NavItem {
        label: "Agents",
        path: "/agents",
        roles: &[Role::Admin],
    },
    NavItem {
        label: "Customers",
        path: "/customers",
        roles: &[Role::Admin, Role::Agent],
    },
    NavItem {
        label: "Create Order",
        path: "/create-order",
        roles: &[Role::Agent],
    },
];

/// Sidebar links visible to `role`.
#[must_use]
pub fn nav_items(role: Role) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| item.roles.contains(&role))
        .copied()
        .collect()
}

// =============================================================================
// Customer visibility
// =============================================================================

/// Customers `identity` may see.
///
/// `agent` is the agent record linked to the identity (by email), if any.
#[must_use]
pub fn customer_scope(identity: &Identity, agent: Option<&Agent>) -> CustomerScope {
    match (identity.role, agent) {
        (Role::Admin, _) => CustomerScope::All,
        (Role::Agent, Some(agent)) => CustomerScope::AssignedTo(agent.id.clone()),
        (Role::Agent, None) => CustomerScope::Nobody,
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Time-of-day word for the dashboard greeting.
#[must_use]
pub const fn greeting(hour: u32) -> &'static str {
    match hour {
        0..12 => "morning",
        12..18 => "afternoon",
        _ => "evening",
    }
}

/// Greeting for the current local time.
#[must_use]
pub fn greeting_now() -> &'static str {
    greeting(chrono::Local::now().hour())
}

/// Page description under the greeting.
#[must_use]
pub const fn dashboard_description(role: Role) -> &'static str {
    match role {
        Role::Admin => "Here's an overview of your affiliate network",
        Role::Agent => "Here's a summary of your assigned work",
    }
}

/// Subtitle of the customers page.
#[must_use]
pub const fn customers_description(role: Role) -> &'static str {
    match role {
        Role::Admin => "All customers and their assigned agents",
        Role::Agent => "Customers assigned to you",
    }
}

/// A dashboard statistic card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub subtitle: String,
}

impl StatCard {
    fn new(title: &'static str, value: impl ToString, subtitle: impl Into<String>) -> Self {
        Self {
            title,
            value: value.to_string(),
            subtitle: subtitle.into(),
        }
    }
}

/// Figures the stat cards are built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardFigures {
    pub total_agents: usize,
    pub active_agents: usize,
    /// Customers in the viewer's scope.
    pub customers: usize,
    /// Orders in the viewer's scope.
    pub orders: OrderStats,
}

/// Stat cards for `role`.
#[must_use]
pub fn stat_cards(role: Role, figures: &DashboardFigures) -> Vec<StatCard> {
    match role {
        Role::Admin => vec![
            StatCard::new(
                "Total Agents",
                figures.total_agents,
                format!("{} active", figures.active_agents),
            ),
            StatCard::new("Total Customers", figures.customers, "Across all agents"),
            StatCard::new("Total Orders", figures.orders.total, "This month"),
        ],
        Role::Agent => vec![
            StatCard::new("Assigned Customers", figures.customers, "Active assignments"),
            StatCard::new("Orders Created", figures.orders.total, "This month"),
            StatCard::new(
                "Completion Rate",
                format!("{}%", figures.orders.completion_rate()),
                "Orders completed",
            ),
        ],
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use affiliate_crm_core::{AgentId, AgentStatus, Email, IdentityId};
    use chrono::NaiveDate;

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: IdentityId::new("2"),
            name: "Sarah Agent".to_string(),
            email: Email::parse("agent@crm.com").unwrap(),
            role,
        }
    }

    #[test]
    fn test_nav_items_by_role() {
        let admin: Vec<_> = nav_items(Role::Admin).iter().map(|i| i.path).collect();
        assert_eq!(admin, ["/dashboard", "/agents", "/customers"]);

        let agent: Vec<_> = nav_items(Role::Agent).iter().map(|i| i.path).collect();
        assert_eq!(agent, ["/dashboard", "/customers", "/create-order"]);
    }

    #[test]
    fn test_customer_scope() {
        let agent = Agent {
            id: AgentId::new("agent-1"),
            name: "Sarah Agent".to_string(),
            email: Email::parse("agent@crm.com").unwrap(),
            phone: String::new(),
            status: AgentStatus::Active,
            assigned_customers: 0,
            created_at: NaiveDate::MIN,
        };

        assert_eq!(
            customer_scope(&identity(Role::Admin), None),
            CustomerScope::All
        );
        assert_eq!(
            customer_scope(&identity(Role::Agent), Some(&agent)),
            CustomerScope::AssignedTo(agent.id.clone())
        );
        assert_eq!(
            customer_scope(&identity(Role::Agent), None),
            CustomerScope::Nobody
        );
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(0), "morning");
        assert_eq!(greeting(11), "morning");
        assert_eq!(greeting(12), "afternoon");
        assert_eq!(greeting(17), "afternoon");
        assert_eq!(greeting(18), "evening");
        assert_eq!(greeting(23), "evening");
    }

    #[test]
    fn test_page_descriptions_by_role() {
        assert_ne!(dashboard_description(Role::Admin), dashboard_description(Role::Agent));
        assert_eq!(
            customers_description(Role::Admin),
            "All customers and their assigned agents"
        );
        assert_eq!(customers_description(Role::Agent), "Customers assigned to you");
    }

    #[test]
    fn test_stat_cards_by_role() {
        let figures = DashboardFigures {
            total_agents: 4,
            active_agents: 3,
            customers: 3,
            orders: OrderStats {
                total: 4,
                pending: 1,
                confirmed: 1,
                completed: 2,
            },
        };

        let admin = stat_cards(Role::Admin, &figures);
        assert_eq!(admin[0].title, "Total Agents");
        assert_eq!(admin[0].subtitle, "3 active");

        let agent = stat_cards(Role::Agent, &figures);
        let titles: Vec<_> = agent.iter().map(|c| c.title).collect();
        assert_eq!(titles, ["Assigned Customers", "Orders Created", "Completion Rate"]);
        assert_eq!(agent[2].value, "50%");
    }
}
