//! Role-based access decisions for guarded views.

use affiliate_crm_core::{Identity, Role};

/// Outcome of an access check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Render the requested view.
    Allow,
    /// No session; send the client to the login page, remembering where it
    /// was headed.
    RedirectToLogin { from: String },
    /// Signed in with the wrong role; fall back to the dashboard.
    RedirectToDashboard,
}

/// Decides whether a session may see a view.
///
/// Stateless; every decision depends only on its arguments.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccessGuard;

impl AccessGuard {
    /// Check `session` against `required_roles` for `requested`.
    ///
    /// An empty `required_roles` means any signed-in identity is allowed.
    #[must_use]
    pub fn check(
        session: Option<&Identity>,
        required_roles: &[Role],
        requested: &str,
    ) -> AccessDecision {
        match session {
            None => AccessDecision::RedirectToLogin {
                from: requested.to_string(),
            },
            Some(_) if required_roles.is_empty() => AccessDecision::Allow,
            Some(identity) if required_roles.contains(&identity.role) => AccessDecision::Allow,
            Some(_) => AccessDecision::RedirectToDashboard,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use affiliate_crm_core::{Email, IdentityId};

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: IdentityId::new("1"),
            name: "Test User".to_string(),
            email: Email::parse("test@crm.com").unwrap(),
            role,
        }
    }

    #[test]
    fn test_absent_session_redirects_to_login() {
        let cases: [&[Role]; 4] = [&[], &[Role::Admin], &[Role::Agent], &Role::ALL];
        for roles in cases {
            assert_eq!(
                AccessGuard::check(None, roles, "/agents?q=sam"),
                AccessDecision::RedirectToLogin {
                    from: "/agents?q=sam".to_string()
                }
            );
        }
    }

    #[test]
    fn test_any_role_allowed_when_unrestricted() {
        for role in Role::ALL {
            assert_eq!(
                AccessGuard::check(Some(&identity(role)), &[], "/dashboard"),
                AccessDecision::Allow
            );
        }
    }

    #[test]
    fn test_matching_role_allowed() {
        let admin = identity(Role::Admin);
        assert_eq!(
            AccessGuard::check(Some(&admin), &[Role::Admin], "/agents"),
            AccessDecision::Allow
        );

        let agent = identity(Role::Agent);
        assert_eq!(
            AccessGuard::check(Some(&agent), &[Role::Admin, Role::Agent], "/customers"),
            AccessDecision::Allow
        );
    }

    #[test]
    fn test_wrong_role_redirects_to_dashboard() {
        let agent = identity(Role::Agent);
        assert_eq!(
            AccessGuard::check(Some(&agent), &[Role::Admin], "/agents"),
            AccessDecision::RedirectToDashboard
        );

        let admin = identity(Role::Admin);
        assert_eq!(
            AccessGuard::check(Some(&admin), &[Role::Agent], "/create-order"),
            AccessDecision::RedirectToDashboard
        );
    }
}
