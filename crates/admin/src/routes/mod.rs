//! HTTP route handlers for the dashboard.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (unguarded)
//! GET  /                       - Redirects to /dashboard
//!
//! # Auth
//! GET  /login                  - Login page (?from=)
//! POST /login                  - Check credentials and sign in
//! POST /logout                 - Sign out
//!
//! # Dashboard (admin, agent)
//! GET  /dashboard              - Greeting, stat cards, recent orders
//!
//! # Agents (admin)
//! GET  /agents                 - Agent list (?q=&status=)
//! POST /agents                 - Add agent
//! POST /agents/{id}/edit       - Edit agent
//! POST /agents/{id}/toggle     - Enable or disable agent
//!
//! # Customers (admin, agent)
//! GET  /customers              - Customer list (?q=&status=)
//! POST /customers/{id}/assign  - Assign agent (admin)
//!
//! # Orders (agent)
//! GET  /create-order           - Order form (?customer=)
//! POST /create-order           - Save order
//! POST /create-order/link      - Generate affiliate link
//! ```
//!
//! Which roles may open which path is declared in [`table`] and enforced by
//! [`crate::middleware::route_guard`], not by the handlers.

use axum::{Router, response::Redirect, routing::get};

pub mod agents;
pub mod auth;
pub mod create_order;
pub mod customers;
pub mod dashboard;
pub mod layout;
pub mod not_found;
pub mod table;

use crate::state::AppState;
use table::DASHBOARD_PATH;

/// Build the complete router for all routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(DASHBOARD_PATH) }))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(agents::router())
        .merge(customers::router())
        .merge(create_order::router())
}
