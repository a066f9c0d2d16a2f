//! Header, sidebar and notices shared by every signed-in page.

use askama::Template;
use axum::response::Html;
use tower_sessions::Session;

use affiliate_crm_core::{Identity, Role};

use crate::session::{Notice, take_notices};
use crate::views::{NavItem, nav_items};

/// Layout data for `base.html`.
#[derive(Debug, Clone)]
pub struct Layout {
    pub user_name: String,
    pub user_email: String,
    pub initials: String,
    pub role: Role,
    pub nav: Vec<NavItem>,
    pub current_path: &'static str,
    pub notices: Vec<Notice>,
}

impl Layout {
    /// Build the layout for `identity`, taking any pending notices.
    pub async fn build(identity: &Identity, current_path: &'static str, session: &Session) -> Self {
        Self {
            user_name: identity.name.clone(),
            user_email: identity.email.to_string(),
            initials: identity.initials(),
            role: identity.role,
            nav: nav_items(identity.role),
            current_path,
            notices: take_notices(session).await,
        }
    }

    /// Add a notice raised while handling this request.
    #[must_use]
    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notices.push(notice);
        self
    }

    /// Whether the sidebar link to `path` is the current page.
    #[must_use]
    pub fn is_current(&self, path: &str) -> bool {
        self.current_path == path
    }
}

/// Render a page template, logging render failures.
pub fn render<T: Template>(template: &T) -> Html<String> {
    Html(template.render().unwrap_or_else(|e| {
        tracing::error!("Template render error: {}", e);
        "Internal Server Error".to_string()
    }))
}
