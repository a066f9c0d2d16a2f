//! Affiliate CRM dashboard library.
//!
//! This crate provides the dashboard as a library so it can be served by the
//! binary and driven in-process by the integration tests.
//!
//! # Access
//!
//! Two roles share one dashboard:
//! - **Admin** - agents, all customers and their assignments
//! - **Agent** - own customers and order creation
//!
//! Every page is declared in [`routes::table::RouteTable`] together with the
//! roles allowed to open it; [`middleware::route_guard`] enforces it.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod session;
pub mod state;
pub mod views;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, header},
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::set_header::SetResponseHeaderLayer;

use middleware::{create_session_layer, route_guard};
use state::AppState;

/// Build the dashboard application.
///
/// Layers, outermost first: security headers, session, route guard. The
/// guard also covers the fallback, so unknown paths below a guarded page are
/// redirected rather than answered with a 404.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .fallback(routes::not_found::not_found)
        .layer(from_fn_with_state(state.clone(), route_guard))
        .layer(session_layer)
        .layer(security_header(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(security_header(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(security_header(
            header::REFERRER_POLICY,
            HeaderValue::from_static("same-origin"),
        ))
        .with_state(state)
}

fn security_header(name: HeaderName, value: HeaderValue) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, value)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::LOCATION},
    };
    use tower::ServiceExt;

    use super::*;
    use crate::config::{AdminConfig, LatencyConfig};

    fn test_app() -> Router {
        let config = AdminConfig {
            latency: LatencyConfig::none(),
            ..AdminConfig::default()
        };
        app(AppState::new(config).unwrap())
    }

    async fn get(path: &str) -> axum::response::Response {
        test_app()
            .oneshot(Request::get(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_is_unguarded() {
        let resp = get("/health").await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_root_redirects_to_dashboard() {
        let resp = get("/").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_guarded_page_without_session_redirects_to_login() {
        let resp = get("/agents/?q=sam").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], "/login?from=%2Fagents%2F%3Fq%3Dsam");
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        assert_eq!(get("/login").await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        assert_eq!(get("/nowhere").await.status(), StatusCode::NOT_FOUND);
    }
}
