//! Path to capability table consulted before any guarded view renders.
//!
//! | path          | access                  |
//! |---------------|-------------------------|
//! | /login        | public                  |
//! | /dashboard    | any signed-in identity  |
//! | /agents       | admin                   |
//! | /customers    | any signed-in identity  |
//! | /create-order | agent                   |
//! | /             | redirect to /dashboard  |
//!
//! An entry covers its exact path and every sub-path (`/agents/{id}/edit`
//! belongs to `/agents`), for every HTTP method. Paths outside the table are
//! not guarded here; they either hit an infrastructure route such as
//! `/health` or fall through to the not-found view.

use affiliate_crm_core::Role;

/// Default view for signed-in identities.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The login view.
pub const LOGIN_PATH: &str = "/login";

/// Views named by the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Dashboard,
    Agents,
    Customers,
    CreateOrder,
}

/// Who may reach an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable regardless of session state.
    Public,
    /// Requires a session; a non-empty slice also restricts the role.
    SignedIn(&'static [Role]),
}

/// One row of the route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub path: &'static str,
    pub view: View,
    pub access: Access,
}

impl RouteEntry {
    /// Whether `path` is this entry or one of its sub-paths.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        path.strip_prefix(self.path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

/// Result of resolving a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// A table entry governs the path.
    Entry(RouteEntry),
    /// The path is an unconditional redirect.
    Redirect(&'static str),
    /// Not in the table.
    Unlisted,
}

const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: LOGIN_PATH,
        view: View::Login,
        access: Access::Public,
    },
    RouteEntry {
        path: DASHBOARD_PATH,
        view: View::Dashboard,
        access: Access::SignedIn(&[]),
    },
    RouteEntry {
        path: "/agents",
        view: View::Agents,
        access: Access::SignedIn(&[Role::Admin]),
    },
    RouteEntry {
        path: "/customers",
        view: View::Customers,
        access: Access::SignedIn(&[]),
    },
    RouteEntry {
        path: "/create-order",
        view: View::CreateOrder,
        access: Access::SignedIn(&[Role::Agent]),
    },
];

/// The dashboard's route table.
#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    entries: &'static [RouteEntry],
}

impl Default for RouteTable {
    fn default() -> Self {
        Self { entries: ROUTES }
    }
}

impl RouteTable {
    /// Resolve a request path (without query string).
    #[must_use]
    pub fn resolve(&self, path: &str) -> Resolution {
        if path == "/" {
            return Resolution::Redirect(DASHBOARD_PATH);
        }

        self.entries
            .iter()
            .find(|entry| entry.covers(path))
            .map_or(Resolution::Unlisted, |entry| Resolution::Entry(*entry))
    }
}

/// Login location that returns to `from` after signing in.
#[must_use]
pub fn login_redirect(from: &str) -> String {
    format!("{LOGIN_PATH}?from={}", urlencoding::encode(from))
}

/// Where to go after a successful login.
///
/// Only local paths are honoured: `from` must start with a single `/` and
/// must not point back at the login view. Anything else yields the
/// dashboard.
#[must_use]
pub fn post_login_location(from: Option<&str>) -> String {
    let Some(from) = from.map(str::trim).filter(|f| !f.is_empty()) else {
        return DASHBOARD_PATH.to_string();
    };

    let is_local = from.starts_with('/')
        && !from.starts_with("//")
        && !from.contains('\\')
        && !from.chars().any(char::is_control);
    let path = from.split(['?', '#']).next().unwrap_or_default();
    let is_login = path == LOGIN_PATH || path.starts_with("/login/");

    if is_local && !is_login {
        from.to_string()
    } else {
        DASHBOARD_PATH.to_string()
    }
}
