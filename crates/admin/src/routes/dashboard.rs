//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tower_sessions::Session;
use tracing::instrument;

use crate::db::{CustomerScope, OrderStats};
use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::Order;
use crate::routes::layout::{Layout, render};
use crate::routes::table::DASHBOARD_PATH;
use crate::state::AppState;
use crate::views::{
    DashboardFigures, StatCard, customer_scope, dashboard_description, greeting_now, stat_cards,
};

/// Number of orders listed under "Recent Orders".
const RECENT_ORDERS: usize = 5;

/// Order row for the recent orders list.
#[derive(Debug, Clone)]
pub struct OrderRow {
    pub product_name: String,
    pub customer_name: String,
    pub platform: &'static str,
    pub status: &'static str,
    pub badge: &'static str,
    pub created_at: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        Self {
            product_name: order.product_name.clone(),
            customer_name: order.customer_name.clone(),
            platform: order.platform.name(),
            status: order.status.label(),
            badge: order.status.badge().as_str(),
            created_at: order.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Dashboard page template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub layout: Layout,
    pub greeting: &'static str,
    pub first_name: String,
    pub description: &'static str,
    pub cards: Vec<StatCard>,
    pub recent_orders: Vec<OrderRow>,
    pub stats: OrderStats,
    pub active_customers: usize,
}

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route(DASHBOARD_PATH, get(index))
}

/// Dashboard overview.
///
/// GET /dashboard
#[instrument(skip(identity, state, session))]
async fn index(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
) -> Html<String> {
    let db = state.db();
    let agent = db.agents().find_by_email(&identity.email).await;
    let scope = customer_scope(&identity, agent.as_ref());

    let (total_agents, active_agents) = db.agents().counts().await;
    let (customers, active_customers) = db.customers().counts(&scope).await;

    let orders = db.orders();
    let (stats, recent) = match &scope {
        CustomerScope::All => (
            orders.stats(None).await,
            orders.recent(None, RECENT_ORDERS).await,
        ),
        CustomerScope::AssignedTo(agent_id) => (
            orders.stats(Some(agent_id)).await,
            orders.recent(Some(agent_id), RECENT_ORDERS).await,
        ),
        CustomerScope::Nobody => (OrderStats::default(), Vec::new()),
    };

    let figures = DashboardFigures {
        total_agents,
        active_agents,
        customers,
        orders: stats,
    };

    let template = DashboardTemplate {
        greeting: greeting_now(),
        first_name: identity.first_name().to_string(),
        description: dashboard_description(identity.role),
        cards: stat_cards(identity.role, &figures),
        recent_orders: recent.iter().map(OrderRow::from).collect(),
        stats,
        active_customers,
        layout: Layout::build(&identity, DASHBOARD_PATH, &session).await,
    };

    render(&template)
}
