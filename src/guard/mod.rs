//! Access guard module for the EcoVault client
//!
//! Mission: Gate navigation on the live session and the route's required role

pub mod routes;

use crate::session::models::Role;
use crate::session::store::SessionStore;
use std::sync::Arc;
use tracing::debug;

pub use routes::{landing_path, Navigation, Route, RouteAccess, RouteTable};

/// Where a rejected navigation is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The sign-in page. The requested destination is discarded.
    Login,
    /// The landing page. An authenticated caller with the wrong role is
    /// bounced here with no further explanation.
    Home,
}

impl RedirectTarget {
    pub fn path(&self) -> &'static str {
        match self {
            RedirectTarget::Login => "/login",
            RedirectTarget::Home => "/",
        }
    }
}

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Admitted,
    Redirect(RedirectTarget),
}

/// Route-level admission check over the live session.
///
/// The store is re-read on every evaluation. Decisions are never cached,
/// so a login, logout or role change takes effect on the very next check.
pub struct AccessGuard {
    store: Arc<SessionStore>,
}

impl AccessGuard {
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Decide admission for a route requiring `required`. `None` admits any
    /// authenticated session. Synchronous and infallible; the only input is
    /// the store read.
    pub fn evaluate(&self, required: Option<Role>) -> GuardDecision {
        let session = self.store.session();

        if !session.is_authenticated() {
            debug!("Guard: unauthenticated, redirecting to login");
            return GuardDecision::Redirect(RedirectTarget::Login);
        }

        if let Some(required) = required {
            if session.role != Some(required) {
                debug!(
                    "Guard: role mismatch (need {}), redirecting home",
                    required.as_str()
                );
                return GuardDecision::Redirect(RedirectTarget::Home);
            }
        }

        GuardDecision::Admitted
    }
}
