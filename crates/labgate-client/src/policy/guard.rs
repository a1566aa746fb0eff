use labgate_core::role::{normalized, role_in};

use crate::config::{NavigationSection, RouteConfig};
use crate::session::SessionState;

use super::routes::RouteTable;

/// Why navigation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session: go log in.
    Unauthenticated,
    /// Session present but its role is not in the required set.
    Unauthorized,
}

/// Decision from guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect { to: String, reason: DenyReason },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect { to, .. } => Some(to),
        }
    }
}

/// Navigation guard. Construct once at startup, evaluate per attempt.
///
/// Evaluation reads the session store and returns immediately; it never
/// touches the network.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    login_path: String,
    home_path: String,
    routes: RouteTable,
}

impl RouteGuard {
    pub fn new(nav: &NavigationSection, routes: &[RouteConfig]) -> Self {
        Self {
            login_path: nav.login.clone(),
            home_path: nav.home.clone(),
            routes: RouteTable::compile(routes),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Guard a destination that requires `required` (any one of them).
    ///
    /// 1. no session -> login
    /// 2. nothing required -> allow
    /// 3. stored role in the required set -> allow, otherwise -> home
    pub fn check<S: AsRef<str>>(&self, session: &SessionState, required: &[S]) -> GuardDecision {
        if !session.is_authenticated() {
            return GuardDecision::Redirect {
                to: self.login_path.clone(),
                reason: DenyReason::Unauthenticated,
            };
        }

        if required.is_empty() {
            return GuardDecision::Allow;
        }

        let raw = session.role();
        if !role_in(raw.as_deref(), required) {
            let wanted: Vec<String> = required.iter().filter_map(|r| normalized(r.as_ref())).collect();
            tracing::warn!(
                raw_role = ?raw,
                role = ?raw.as_deref().and_then(normalized),
                required = ?wanted,
                "navigation denied"
            );
            return GuardDecision::Redirect {
                to: self.home_path.clone(),
                reason: DenyReason::Unauthorized,
            };
        }

        tracing::debug!(role = ?raw.as_deref().and_then(normalized), "navigation allowed");
        GuardDecision::Allow
    }

    /// Guard a concrete path using the route table. Public paths always pass.
    pub fn check_path(&self, session: &SessionState, path: &str) -> GuardDecision {
        match self.routes.lookup(path) {
            Some(rule) => self.check(session, rule.roles.as_slice()),
            None => GuardDecision::Allow,
        }
    }
}
