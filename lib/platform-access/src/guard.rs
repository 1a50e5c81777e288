//! Navigation-time access control.
//!
//! The guard is a pure decision over the current session and the route's
//! declared roles. Performing the redirect is left to the caller.

use crate::session::Session;

/// Route of the login screen.
pub const LOGIN_PATH: &str = "/login";
/// Landing route for authenticated users.
pub const DEFAULT_LANDING_PATH: &str = "/dashboard";
/// Query parameter carrying the originally requested path.
pub const RETURN_PARAM: &str = "r";

/// Access rule attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteRule {
    pub path: &'static str,
    /// Roles allowed on the route. `None` or empty means any signed-in user.
    pub roles: Option<&'static [&'static str]>,
}

/// Routes that require a session.
pub const ROUTE_RULES: &[RouteRule] = &[RouteRule {
    path: DEFAULT_LANDING_PATH,
    roles: None,
}];

/// Looks up the rule declared for `path`.
#[must_use]
pub fn rule_for(path: &str) -> Option<&'static RouteRule> {
    ROUTE_RULES.iter().find(|rule| rule.path == path)
}

/// Outcome of a guard check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Navigation may proceed.
    Allow,
    /// No token: send the user to log in, then back to `return_to`.
    RedirectToLogin { return_to: String },
    /// Signed in, but the role is not allowed here.
    RedirectToLanding,
}

impl GuardDecision {
    /// Returns true if navigation may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Returns the URL to redirect to, if navigation is denied.
    #[must_use]
    pub fn redirect_target(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { return_to } => Some(login_url(return_to)),
            Self::RedirectToLanding => Some(DEFAULT_LANDING_PATH.to_string()),
        }
    }
}

/// Decides whether `session` may navigate to `requested`.
#[must_use]
pub fn check_access(
    session: &Session,
    required_roles: Option<&[&str]>,
    requested: &str,
) -> GuardDecision {
    if session.token().is_none() {
        return GuardDecision::RedirectToLogin {
            return_to: requested.to_string(),
        };
    }

    match required_roles {
        Some(roles) if !roles.is_empty() && !session.has_any_role(roles) => {
            GuardDecision::RedirectToLanding
        }
        _ => GuardDecision::Allow,
    }
}

/// Builds the login URL carrying `return_to`.
#[must_use]
pub fn login_url(return_to: &str) -> String {
    format!(
        "{LOGIN_PATH}?{RETURN_PARAM}={}",
        urlencoding::encode(return_to)
    )
}

/// Joins a path and its query string into the URL the guard records.
///
/// `search` may be given with or without its leading `?`.
#[must_use]
pub fn requested_url(path: &str, search: &str) -> String {
    match search.trim_start_matches('?') {
        "" => path.to_string(),
        query => format!("{path}?{query}"),
    }
}

/// Picks where to go after a successful login.
///
/// Only local absolute paths are honoured; anything else (missing, relative,
/// protocol-relative, or the login page itself) lands on the dashboard.
#[must_use]
pub fn post_login_target(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && path.split('?').next() != Some(LOGIN_PATH) =>
        {
            path
        }
        _ => DEFAULT_LANDING_PATH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::{ADMINISTRADOR, CAJERO, CONTADOR, Role};

    fn session(role: &str) -> Session {
        Session::established(
            "tok".to_string(),
            "ana".to_string(),
            Role::parse(role).expect("role"),
        )
    }

    #[test]
    fn missing_token_redirects_to_login_with_return_target() {
        let decision = check_access(&Session::default(), None, "/dashboard");
        assert_eq!(
            decision,
            GuardDecision::RedirectToLogin {
                return_to: "/dashboard".to_string()
            }
        );
        assert_eq!(
            decision.redirect_target().as_deref(),
            Some("/login?r=%2Fdashboard")
        );
    }

    #[test]
    fn role_outside_required_set_redirects_to_landing() {
        let decision = check_access(&session(CAJERO), Some(&[ADMINISTRADOR, CONTADOR]), "/diario");
        assert_eq!(decision, GuardDecision::RedirectToLanding);
        assert_eq!(decision.redirect_target().as_deref(), Some("/dashboard"));
    }

    #[test]
    fn member_role_is_allowed() {
        let decision = check_access(&session(CONTADOR), Some(&[ADMINISTRADOR, CONTADOR]), "/diario");
        assert!(decision.is_allowed());
        assert!(decision.redirect_target().is_none());
    }

    #[test]
    fn empty_or_missing_role_list_allows_any_signed_in_user() {
        assert!(check_access(&session(CAJERO), None, "/dashboard").is_allowed());
        assert!(check_access(&session(CAJERO), Some(&[]), "/dashboard").is_allowed());
    }

    #[test]
    fn dashboard_rule_requires_only_authentication() {
        let rule = rule_for("/dashboard").expect("dashboard rule");
        assert!(rule.roles.is_none());
        assert!(rule_for("/inventario").is_none());
    }

    #[test]
    fn return_target_keeps_query_string() {
        assert_eq!(requested_url("/dashboard", ""), "/dashboard");
        assert_eq!(requested_url("/dashboard", "?"), "/dashboard");
        assert_eq!(requested_url("/dashboard", "tab=1"), "/dashboard?tab=1");

        let requested = requested_url("/dashboard", "?tab=1&q=a b");
        let target = check_access(&Session::default(), None, &requested)
            .redirect_target()
            .expect("redirect");
        assert_eq!(target, "/login?r=%2Fdashboard%3Ftab%3D1%26q%3Da%20b");
        assert_eq!(post_login_target(Some(&requested)), "/dashboard?tab=1&q=a b");
    }

    #[test]
    fn post_login_target_accepts_local_paths_only() {
        assert_eq!(post_login_target(Some("/dashboard")), "/dashboard");
        assert_eq!(post_login_target(Some("/dashboard?tab=1")), "/dashboard?tab=1");
        assert_eq!(post_login_target(Some("//evil.example")), DEFAULT_LANDING_PATH);
        assert_eq!(post_login_target(Some("https://evil.example")), DEFAULT_LANDING_PATH);
        assert_eq!(post_login_target(Some("/login?r=/x")), DEFAULT_LANDING_PATH);
        assert_eq!(post_login_target(None), DEFAULT_LANDING_PATH);
    }
}
