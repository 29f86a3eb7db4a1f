//! Session Models
//! Mission: Define the role and session types shared by the store and guard

use serde::{Deserialize, Serialize};

/// Account roles for RBAC route gating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "ROLE_ADMIN")]
    Admin, // Dashboards + user/personnel administration
    #[serde(rename = "ROLE_USER")]
    User, // Pickup requests + own profile
    #[serde(rename = "ROLE_PERSONNEL")]
    Personnel, // Assigned collection work
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "ROLE_ADMIN",
            Role::User => "ROLE_USER",
            Role::Personnel => "ROLE_PERSONNEL",
        }
    }

    /// Parse a backend role string. Exact match: the backend sends these
    /// verbatim and the guard compares them by equality.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "ROLE_ADMIN" => Some(Role::Admin),
            "ROLE_USER" => Some(Role::User),
            "ROLE_PERSONNEL" => Some(Role::Personnel),
            _ => None,
        }
    }
}

/// The current session: an auth token paired with a role.
///
/// Token and role are either both present or both absent. A half-present
/// pair is never returned; the store reads it as logged out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    /// The logged-out session.
    pub fn empty() -> Self {
        Self {
            token: None,
            role: None,
        }
    }

    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: Some(token.into()),
            role: Some(role),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
