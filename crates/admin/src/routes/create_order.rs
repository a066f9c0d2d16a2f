//! Order creation route handlers (agents only).

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use affiliate_crm_core::{Identity, OrderStatus, Platform};

use crate::components::{SelectOption, options};
use crate::db::{CustomerFilter, CustomerScope, RepositoryError};
use crate::error::AppError;
use crate::filters;
use crate::middleware::CurrentIdentity;
use crate::models::{Agent, CustomerMode, OrderForm};
use crate::routes::layout::{Layout, render};
use crate::session::{Notice, push_notice};
use crate::state::AppState;
use crate::views::customer_scope;

const CREATE_ORDER_PATH: &str = "/create-order";
const CUSTOMERS_PATH: &str = "/customers";

/// Query parameters of the order page.
#[derive(Debug, Default, Deserialize)]
pub struct CreateOrderQuery {
    /// Customer to preselect.
    pub customer: Option<String>,
}

/// Order form state for templates.
#[derive(Debug, Clone)]
pub struct OrderFormView {
    pub new_customer: bool,
    pub new_customer_name: String,
    pub new_customer_phone: String,
    pub product_name: String,
    pub product_url: String,
    pub affiliate_link: String,
    pub customers: Vec<SelectOption>,
    pub platforms: Vec<SelectOption>,
    pub statuses: Vec<SelectOption>,
}

impl OrderFormView {
    fn new(form: &OrderForm, assigned: &[(String, String)]) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        let customers = options(
            assigned.iter().map(|(id, label)| (id.clone(), label.clone())),
            form.customer_id.as_deref().unwrap_or_default(),
        );
        let platforms = options(
            Platform::ALL.iter().map(|p| (p.name(), p.name())),
            form.platform.as_deref().unwrap_or_default(),
        );
        let statuses = options(
            OrderStatus::ALL.iter().map(|s| (s.as_str(), s.label())),
            form.status
                .as_deref()
                .unwrap_or(OrderStatus::default().as_str()),
        );

        Self {
            new_customer: form.customer_mode == CustomerMode::New,
            new_customer_name: text(&form.new_customer_name),
            new_customer_phone: text(&form.new_customer_phone),
            product_name: text(&form.product_name),
            product_url: text(&form.product_url),
            affiliate_link: text(&form.affiliate_link),
            customers,
            platforms,
            statuses,
        }
    }
}

/// Create order page template.
#[derive(Template)]
#[template(path = "create_order.html")]
pub struct CreateOrderTemplate {
    pub layout: Layout,
    pub form: OrderFormView,
    pub has_customers: bool,
}

/// Build the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(CREATE_ORDER_PATH, get(index).post(create))
        .route("/create-order/link", post(generate_link))
}

/// The agent record of `identity`.
async fn current_agent(state: &AppState, identity: &Identity) -> Option<Agent> {
    state.db().agents().find_by_email(&identity.email).await
}

/// `(id, "name - phone")` of every customer the agent may order for.
async fn assigned_customers(
    state: &AppState,
    agent: Option<&Agent>,
    identity: &Identity,
) -> Vec<(String, String)> {
    let scope = customer_scope(identity, agent);
    if scope == CustomerScope::Nobody {
        return Vec::new();
    }
    state
        .db()
        .customers()
        .list(&scope, &CustomerFilter::default())
        .await
        .into_iter()
        .map(|c| (c.id.to_string(), format!("{} - {}", c.name, c.phone)))
        .collect()
}

/// Render the order page for `form`.
async fn order_page(
    state: &AppState,
    identity: &Identity,
    session: &Session,
    form: &OrderForm,
    notice: Option<Notice>,
) -> CreateOrderTemplate {
    let agent = current_agent(state, identity).await;
    let customers = assigned_customers(state, agent.as_ref(), identity).await;

    let mut layout = Layout::build(identity, CREATE_ORDER_PATH, session).await;
    if let Some(notice) = notice {
        layout = layout.with_notice(notice);
    }

    CreateOrderTemplate {
        layout,
        has_customers: !customers.is_empty(),
        form: OrderFormView::new(form, &customers),
    }
}

/// Order form, optionally with a preselected customer.
///
/// GET /create-order
#[instrument(skip(identity, state, session))]
async fn index(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<CreateOrderQuery>,
) -> Response {
    let form = OrderForm {
        customer_id: query.customer,
        ..OrderForm::default()
    };
    render(&order_page(&state, &identity, &session, &form, None).await).into_response()
}

/// Generate an affiliate link and re-render the form with it filled in.
///
/// POST /create-order/link
#[instrument(skip(identity, state, session, form))]
async fn generate_link(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Response {
    let mut form = form;
    let (status, notice) = match form.link_request() {
        Ok((platform, url)) => {
            let link = state.links().generate(platform, &url).await;
            form.affiliate_link = Some(link);
            (
                StatusCode::OK,
                Notice::success(
                    "Link Generated",
                    "Affiliate link has been generated successfully.",
                ),
            )
        }
        Err(e) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Notice::destructive(e.title(), e.to_string()),
        ),
    };

    let page = order_page(&state, &identity, &session, &form, Some(notice)).await;
    (status, render(&page)).into_response()
}

/// Save the order.
///
/// POST /create-order
#[instrument(skip(identity, state, session, form))]
async fn create(
    CurrentIdentity(identity): CurrentIdentity,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<OrderForm>,
) -> Result<Response, AppError> {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(e) => {
            let notice = Notice::destructive(e.title(), e.to_string());
            let page = order_page(&state, &identity, &session, &form, Some(notice)).await;
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, render(&page)).into_response());
        }
    };

    let agent = current_agent(&state, &identity)
        .await
        .ok_or_else(|| AppError::BadRequest("no agent record for this account".to_string()))?;

    let delay = state.config().latency.save_order;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let order = match state.db().orders().create(&agent.id, draft).await {
        Ok(order) => order,
        Err(e @ RepositoryError::NotAssigned { .. }) => {
            let notice = Notice::destructive("Validation Error", e.to_string());
            let page = order_page(&state, &identity, &session, &form, Some(notice)).await;
            return Ok((StatusCode::BAD_REQUEST, render(&page)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    push_notice(
        &session,
        Notice::success(
            "Order Created",
            format!("Order for {} has been created successfully.", order.customer_name),
        ),
    )
    .await?;

    Ok(Redirect::to(CUSTOMERS_PATH).into_response())
}
