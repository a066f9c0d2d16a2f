//! Agent management route handlers (admin only).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{Html, Redirect},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use affiliate_crm_core::{AgentId, AgentStatus};

use crate::components::{DataTableConfig, SelectOption, agents_table_config};
use crate::db::{AgentFilter, RepositoryError, StatusFilter};
use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::{Agent, AgentForm};
use crate::routes::layout::{Layout, render};
use crate::session::{Notice, push_notice};
use crate::state::AppState;

const AGENTS_PATH: &str = "/agents";

/// List filters from the query string.
#[derive(Debug, Default, Deserialize)]
pub struct AgentsQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// Agent view for templates.
#[derive(Debug, Clone)]
pub struct AgentRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub assigned_customers: u32,
    pub status: &'static str,
    pub is_active: bool,
    pub created_at: String,
}

impl From<&Agent> for AgentRow {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id.to_string(),
            name: agent.name.clone(),
            email: agent.email.to_string(),
            phone: agent.phone.clone(),
            assigned_customers: agent.assigned_customers,
            status: agent.status.label(),
            is_active: agent.is_active(),
            created_at: agent.created_at.format("%b %-d, %Y").to_string(),
        }
    }
}

/// Agents page template.
#[derive(Template)]
#[template(path = "agents.html")]
pub struct AgentsTemplate {
    pub layout: Layout,
    pub table: DataTableConfig,
    pub agents: Vec<AgentRow>,
    pub search: String,
    pub status_options: Vec<SelectOption>,
}

/// Build the agents router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(AGENTS_PATH, get(index).post(create))
        .route("/agents/{id}/edit", post(update))
        .route("/agents/{id}/toggle", post(toggle))
}

/// Agent list with search and status filter.
///
/// GET /agents
#[instrument(skip(identity, state, session))]
async fn index(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<AgentsQuery>,
) -> Html<String> {
    let filter = AgentFilter {
        search: query.q.clone(),
        status: StatusFilter::parse(query.status.as_deref()),
    };
    let agents = state.db().agents().list(&filter).await;

    let table = agents_table_config();
    let status_options = table.select_options("status", query.status.as_deref());

    let template = AgentsTemplate {
        layout: Layout::build(&identity, AGENTS_PATH, &session).await,
        table,
        agents: agents.iter().map(AgentRow::from).collect(),
        search: query.q.unwrap_or_default(),
        status_options,
    };

    render(&template)
}

/// Add an agent.
///
/// POST /agents
#[instrument(skip(state, session, form))]
async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AgentForm>,
) -> Result<Redirect, AppError> {
    let notice = match form.to_new_agent() {
        Err(e) => Notice::destructive(e.title(), e.to_string()),
        Ok(new) => match state.db().agents().create(new).await {
            Ok(agent) => Notice::success(
                "Agent Added",
                format!("{} has been added successfully.", agent.name),
            ),
            Err(RepositoryError::Conflict(message)) => {
                Notice::destructive("Validation Error", message)
            }
            Err(e) => return Err(e.into()),
        },
    };

    push_notice(&session, notice).await?;
    Ok(Redirect::to(AGENTS_PATH))
}

/// Edit an agent's name, email and phone.
///
/// POST /agents/{id}/edit
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Form(form): Form<AgentForm>,
) -> Result<Redirect, AppError> {
    let id = AgentId::new(id);

    let notice = match form.to_update() {
        Err(e) => Notice::destructive(e.title(), e.to_string()),
        Ok(update) => match state.db().agents().update(&id, update).await {
            Ok(agent) => Notice::success(
                "Agent Updated",
                format!("{}'s information has been updated.", agent.name),
            ),
            Err(RepositoryError::Conflict(message)) => {
                Notice::destructive("Validation Error", message)
            }
            Err(e) => return Err(e.into()),
        },
    };

    push_notice(&session, notice).await?;
    Ok(Redirect::to(AGENTS_PATH))
}

/// Enable or disable an agent.
///
/// POST /agents/{id}/toggle
#[instrument(skip(state, session))]
async fn toggle(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    let agent = state
        .db()
        .agents()
        .toggle_status(&AgentId::new(id))
        .await?;

    let verb = match agent.status {
        AgentStatus::Active => "enabled",
        AgentStatus::Inactive => "disabled",
    };
    push_notice(
        &session,
        Notice::success(
            "Status Updated",
            format!("{} has been {verb}.", agent.name),
        ),
    )
    .await?;

    Ok(Redirect::to(AGENTS_PATH))
}
