//! Route guard middleware and identity extractor.
//!
//! [`route_guard`] runs before every handler. It resolves the request path
//! in the [`RouteTable`](crate::routes::table::RouteTable), restores the
//! client's [`SessionStore`], asks the [`AccessGuard`] for a decision and
//! either redirects or hands the [`Identity`] to the handler through the
//! request extensions.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use affiliate_crm_core::Identity;

use crate::error::set_sentry_user;
use crate::routes::table::{Access, DASHBOARD_PATH, Resolution, login_redirect};
use crate::services::{AccessDecision, AccessGuard};
use crate::session::{SessionError, SessionStore};
use crate::state::AppState;

/// Guard every request covered by the route table.
pub async fn route_guard(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Response {
    let entry = match state.routes().resolve(request.uri().path()) {
        Resolution::Redirect(to) => return Redirect::to(to).into_response(),
        Resolution::Unlisted => return next.run(request).await,
        Resolution::Entry(entry) => entry,
    };

    let requested = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), |pq| pq.as_str().to_string());

    let store = SessionStore::open(session).await;
    let identity = store.current().cloned();

    let decision = match entry.access {
        Access::Public => AccessDecision::Allow,
        Access::SignedIn(roles) => AccessGuard::check(identity.as_ref(), roles, &requested),
    };

    match decision {
        AccessDecision::Allow => {
            if let Some(identity) = identity {
                set_sentry_user(&identity);
                request.extensions_mut().insert(identity);
            }
            next.run(request).await
        }
        AccessDecision::RedirectToLogin { from } => {
            tracing::debug!(%from, "No session, redirecting to login");
            Redirect::to(&login_redirect(&from)).into_response()
        }
        AccessDecision::RedirectToDashboard => {
            tracing::debug!(path = %requested, view = ?entry.view, "Role not permitted");
            Redirect::to(DASHBOARD_PATH).into_response()
        }
    }
}

/// Extractor for the identity admitted by [`route_guard`].
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentIdentity(identity): CurrentIdentity,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", identity.name)
/// }
/// ```
pub struct CurrentIdentity(pub Identity);

/// The handler is mounted where [`route_guard`] admits no identity.
#[derive(Debug)]
pub struct MissingIdentity;

impl IntoResponse for MissingIdentity {
    fn into_response(self) -> Response {
        tracing::error!("Handler requires an identity but none was admitted by the route guard");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = MissingIdentity;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or(MissingIdentity)
    }
}

/// Helper to sign `identity` in on this session.
///
/// The session ID is rotated first.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_identity(session: Session, identity: Identity) -> Result<(), SessionError> {
    session.cycle_id().await.map_err(SessionError::backend)?;
    let mut store = SessionStore::open(session).await;
    store.set(identity).await
}

/// Helper to clear the signed-in identity from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_identity(session: Session) -> Result<(), SessionError> {
    let mut store = SessionStore::open(session).await;
    store.clear().await
}
