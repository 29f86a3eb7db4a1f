//! Authentication Module
//! Mission: Authenticate against the EcoVault backend and feed the session store

pub mod api;
pub mod models;
pub mod service;

pub use api::{AuthApi, HttpAuthApi};
pub use models::AuthError;
pub use service::{AuthService, LoginOutcome};
