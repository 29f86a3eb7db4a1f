//! EcoVault Client Library
//!
//! Exposes the session, guard and auth modules for use by the binary and
//! the integration tests.

pub mod auth;
pub mod config;
pub mod guard;
pub mod session;

pub use guard::{AccessGuard, GuardDecision, RedirectTarget};
pub use session::{Role, Session, SessionStore};
