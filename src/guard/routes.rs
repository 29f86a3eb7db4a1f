//! Route Table
//! Mission: Map client paths to access requirements and resolve navigations

use crate::guard::{AccessGuard, GuardDecision};
use crate::session::models::Role;
use std::fmt;
use tracing::{debug, warn};

/// Redirect hops followed before a table is declared misconfigured.
const MAX_REDIRECT_HOPS: usize = 8;

/// Access requirement attached to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// No guard at all.
    Public,
    /// Any authenticated session.
    Authenticated,
    /// Authenticated with exactly this role.
    Role(Role),
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteAccess::Public => write!(f, "public"),
            RouteAccess::Authenticated => write!(f, "authenticated"),
            RouteAccess::Role(role) => write!(f, "requires {}", role.as_str()),
        }
    }
}

/// A navigable route.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    pub access: RouteAccess,
}

/// Where a navigation attempt ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// The requested route renders.
    Rendered { path: String },
    /// The guard bounced the request; `to` is the route that renders instead.
    RedirectedTo { from: String, to: String },
    /// No route matches the path.
    NotFound { path: String },
    /// Redirects never reached a renderable route. Happens when the table
    /// is misconfigured, e.g. a guarded home route bouncing onto itself.
    RedirectLoop { path: String },
}

/// Ordered route registry with exact-path lookup.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The EcoVault client's route table: the public pages plus the three
    /// role-gated areas.
    pub fn ecovault_defaults() -> Self {
        let mut table = Self::new();
        for path in [
            "/",
            "/login",
            "/register",
            "/verify-email",
            "/reset-password",
            "/services",
            "/impact",
            "/contact",
        ] {
            table.register(path, RouteAccess::Public);
        }
        table.register("/admin", RouteAccess::Role(Role::Admin));
        table.register("/dashboard", RouteAccess::Role(Role::User));
        table.register("/profile", RouteAccess::Role(Role::User));
        table.register("/personnel-dashboard", RouteAccess::Role(Role::Personnel));
        table
    }

    pub fn register(&mut self, path: impl Into<String>, access: RouteAccess) {
        self.routes.push(Route {
            path: path.into(),
            access,
        });
    }

    /// Exact-path lookup. First registration wins on duplicates.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    /// Resolve a navigation attempt: evaluate the guard for the requested
    /// route, then follow each redirect through the table one hop at a time
    /// until something renders.
    pub fn check(&self, guard: &AccessGuard, path: &str) -> Navigation {
        let mut current = path.to_string();

        for _ in 0..MAX_REDIRECT_HOPS {
            let Some(route) = self.find(&current) else {
                return Navigation::NotFound { path: current };
            };

            let decision = match route.access {
                RouteAccess::Public => GuardDecision::Admitted,
                RouteAccess::Authenticated => guard.evaluate(None),
                RouteAccess::Role(role) => guard.evaluate(Some(role)),
            };

            match decision {
                GuardDecision::Admitted => {
                    if current == path {
                        return Navigation::Rendered { path: current };
                    }
                    return Navigation::RedirectedTo {
                        from: path.to_string(),
                        to: current,
                    };
                }
                GuardDecision::Redirect(target) => {
                    debug!("Navigation {} bounced to {}", current, target.path());
                    current = target.path().to_string();
                }
            }
        }

        warn!(
            "Redirects from {} did not settle after {} hops, the route table loops",
            path, MAX_REDIRECT_HOPS
        );
        Navigation::RedirectLoop {
            path: path.to_string(),
        }
    }
}

/// Post-login landing route for a role.
pub fn landing_path(role: Role) -> &'static str {
    match role {
        Role::Admin => "/admin",
        Role::User => "/dashboard",
        Role::Personnel => "/personnel-dashboard",
    }
}
