//! Customer list and assignment route handlers.

use std::collections::HashMap;

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    http::Uri,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use affiliate_crm_core::{AgentId, CustomerId, Role};

use crate::components::{DataTableConfig, SelectOption, customers_table_config, options};
use crate::db::{AgentFilter, CustomerFilter, RepositoryError, StatusFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::{Agent, AssignForm, Customer};
use crate::routes::layout::{Layout, render};
use crate::routes::table::DASHBOARD_PATH;
use crate::services::{AccessDecision, AccessGuard};
use crate::session::{Notice, push_notice};
use crate::state::AppState;
use crate::views::{customer_scope, customers_description};

const CUSTOMERS_PATH: &str = "/customers";

/// List filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct CustomersQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Customer view for templates.
#[derive(Debug, Clone)]
pub struct CustomerRow {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    /// Name of the assigned agent, if any.
    pub assigned_agent: Option<String>,
    /// Assignment choices for the admin form; empty for agents.
    pub agent_options: Vec<SelectOption>,
    pub status: &'static str,
    pub badge: &'static str,
}

impl CustomerRow {
    fn new(customer: &Customer, agents: &HashMap<&AgentId, &Agent>, assignable: &[Agent]) -> Self {
        let current = customer
            .assigned_agent
            .as_ref()
            .map_or("unassigned", AgentId::as_str);

        let agent_options = if assignable.is_empty() {
            Vec::new()
        } else {
            options(
                std::iter::once(("unassigned".to_string(), "Unassigned".to_string())).chain(
                    assignable
                        .iter()
                        .map(|a| (a.id.to_string(), a.name.clone())),
                ),
                current,
            )
        };

        Self {
            id: customer.id.to_string(),
            name: customer.name.clone(),
            phone: customer.phone.clone(),
            email: customer.email.as_ref().map(ToString::to_string),
            assigned_agent: customer
                .assigned_agent
                .as_ref()
                .and_then(|id| agents.get(id))
                .map(|a| a.name.clone()),
            agent_options,
            status: customer.status.label(),
            badge: customer.status.badge().as_str(),
        }
    }
}

/// Customers page template.
#[derive(Template)]
#[template(path = "customers.html")]
pub struct CustomersTemplate {
    pub layout: Layout,
    pub description: &'static str,
    pub table: DataTableConfig,
    pub customers: Vec<CustomerRow>,
    pub search: String,
    pub status_options: Vec<SelectOption>,
}

/// Build the customers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(CUSTOMERS_PATH, get(index))
        .route("/customers/{id}/assign", post(assign))
}

/// Customer list, scoped to what the viewer may see.
///
/// GET /customers
#[instrument(skip(identity, state, session))]
async fn index(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CustomersQuery>,
) -> Html<String> {
    let db = state.db();
    let agent = db.agents().find_by_email(&identity.email).await;
    let scope = customer_scope(&identity, agent.as_ref());

    let filter = CustomerFilter {
        search: query.q.clone(),
        status: StatusFilter::parse(query.status.as_deref()),
    };
    let customers = db.customers().list(&scope, &filter).await;

    let all_agents = db.agents().list(&AgentFilter::default()).await;
    let by_id: HashMap<&AgentId, &Agent> = all_agents.iter().map(|a| (&a.id, a)).collect();
    let assignable = match identity.role {
        Role::Admin => db.agents().active().await,
        Role::Agent => Vec::new(),
    };

    let table = customers_table_config(identity.role);
    let status_options = table.select_options("status", query.status.as_deref());

    let template = CustomersTemplate {
        customers: customers
            .iter()
            .map(|c| CustomerRow::new(c, &by_id, &assignable))
            .collect(),
        layout: Layout::build(&identity, CUSTOMERS_PATH, &session).await,
        description: customers_description(identity.role),
        table,
        search: query.q.unwrap_or_default(),
        status_options,
    };

    render(&template)
}

/// Assign a customer to an agent, or unassign it.
///
/// POST /customers/{id}/assign
#[instrument(skip(identity, state, session, form))]
async fn assign(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    Path(id): Path<String>,
    Form(form): Form<AssignForm>,
) -> Result<Response, AppError> {
    if AccessGuard::check(Some(&identity), &[Role::Admin], uri.path()) != AccessDecision::Allow {
        tracing::warn!(identity_id = %identity.id, "Assignment attempted without admin role");
        return Ok(Redirect::to(DASHBOARD_PATH).into_response());
    }

    let customer_id = CustomerId::new(id);
    let notice = match state
        .db()
        .customers()
        .assign(&customer_id, form.agent_id().as_ref())
        .await
    {
        Ok((customer, Some(agent))) => Notice::success(
            "Agent Assigned",
            format!("{} is now assigned to {}.", customer.name, agent.name),
        ),
        Ok((customer, None)) => Notice::success(
            "Agent Unassigned",
            format!("{} is no longer assigned to an agent.", customer.name),
        ),
        Err(RepositoryError::InactiveAgent(_)) => Notice::destructive(
            "Assignment Failed",
            "Customers can only be assigned to active agents.",
        ),
        Err(e) => return Err(e.into()),
    };

    push_notice(&session, notice).await?;
    Ok(Redirect::to(CUSTOMERS_PATH).into_response())
}
