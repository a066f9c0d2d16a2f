//! Sign-in and sign-out route handlers.

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

use crate::error::{AppError, clear_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_identity, set_current_identity};
use crate::models::LoginForm;
use crate::routes::layout::render;
use crate::routes::table::{LOGIN_PATH, post_login_location};
use crate::services::AuthError;
use crate::session::{Notice, push_notice, take_notices};
use crate::state::AppState;

/// Query parameters of the login page.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    /// Page the visitor was sent away from.
    pub from: Option<String>,
}

/// Login page template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    from: String,
    email: String,
    notices: Vec<Notice>,
    show_demo_accounts: bool,
}

impl LoginTemplate {
    fn new(state: &AppState, from: Option<String>, email: String, notices: Vec<Notice>) -> Self {
        Self {
            from: from.unwrap_or_default(),
            email,
            notices,
            show_demo_accounts: state.config().credentials_file.is_none(),
        }
    }
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /login
async fn login_page(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<LoginQuery>,
) -> impl IntoResponse {
    let notices = take_notices(&session).await;
    render(&LoginTemplate::new(&state, query.from, String::new(), notices))
}

/// Check the submitted credentials and sign the visitor in.
///
/// POST /login
#[instrument(skip(state, session, form), fields(email = %form.email))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if let Err(e) = form.validate() {
        let notice = Notice::destructive(e.title(), e.to_string());
        let page = LoginTemplate::new(&state, form.from, form.email, vec![notice]);
        return (StatusCode::UNPROCESSABLE_ENTITY, render(&page)).into_response();
    }

    let identity = match state
        .authenticator()
        .authenticate(&form.email, &form.password)
        .await
    {
        Ok(identity) => identity,
        Err(e @ AuthError::InvalidCredentials) => {
            tracing::info!("Login failed");
            let notice = Notice::destructive("Login Failed", e.to_string());
            let page = LoginTemplate::new(&state, form.from, form.email, vec![notice]);
            return (StatusCode::UNAUTHORIZED, render(&page)).into_response();
        }
        Err(e) => return AppError::Internal(e.to_string()).into_response(),
    };

    let location = post_login_location(form.from.as_deref());
    let welcome = Notice::success(
        "Welcome back!",
        format!("You have successfully logged in as {}.", identity.name),
    );

    tracing::info!(identity_id = %identity.id, role = %identity.role, "Signed in");

    if let Err(e) = set_current_identity(session.clone(), identity).await {
        return AppError::from(e).into_response();
    }
    if let Err(e) = push_notice(&session, welcome).await {
        tracing::warn!(error = %e, "Failed to store welcome notice");
    }

    Redirect::to(&location).into_response()
}

/// Sign out and return to the login page.
///
/// POST /logout
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Redirect, AppError> {
    clear_current_identity(session).await?;
    clear_sentry_user();

    Ok(Redirect::to(LOGIN_PATH))
}
