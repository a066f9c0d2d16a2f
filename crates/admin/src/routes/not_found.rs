//! Fallback for paths no route matches.

use askama::Template;
use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::filters;
use crate::routes::layout::render;
use crate::routes::table::DASHBOARD_PATH;

/// Not-found page template.
#[derive(Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate {
    path: String,
    home: &'static str,
}

/// Render the not-found view with a 404 status.
pub async fn not_found(uri: Uri) -> Response {
    tracing::debug!(path = %uri.path(), "No route matched");

    let template = NotFoundTemplate {
        path: uri.path().to_string(),
        home: DASHBOARD_PATH,
    };
    (StatusCode::NOT_FOUND, render(&template)).into_response()
}
