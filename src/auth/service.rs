//! Auth Service
//! Mission: Run the login flows and keep the session store in sync

use crate::auth::api::AuthApi;
use crate::auth::models::{
    ApiMessage, AuthError, LoginRequest, RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};
use crate::session::models::Role;
use crate::session::store::SessionStore;
use std::sync::Arc;
use tracing::{info, warn};

/// What a successful login established.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub role: Role,
    /// The account is on a temporary password and should go set a new one.
    /// The session is stored either way.
    pub must_reset_password: bool,
    pub message: Option<String>,
}

/// Login/logout orchestration over the API client and the session store.
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    store: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<SessionStore>) -> Self {
        Self { api, store }
    }

    /// Authenticate and store the session.
    ///
    /// The store is only written for a complete, well-formed success reply.
    /// Rejected or malformed logins leave it untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        info!("🔐 Login attempt: {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let response = self.api.login(&request).await?;

        if !response.success {
            warn!("❌ Login rejected: {}", username);
            return Err(AuthError::LoginRejected(
                response
                    .message
                    .unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        let (Some(token), Some(role_raw)) = (response.token, response.role) else {
            warn!("❌ Login reply for {} is missing token or role", username);
            return Err(AuthError::IncompleteCredentials);
        };
        let Some(role) = Role::from_str(&role_raw) else {
            warn!("❌ Login reply for {} has unknown role {}", username, role_raw);
            return Err(AuthError::UnexpectedRole(role_raw));
        };

        self.store
            .set_session(&token, role)
            .map_err(AuthError::Storage)?;

        info!("✅ Login successful: {} ({})", username, role.as_str());

        Ok(LoginOutcome {
            role,
            must_reset_password: response.must_reset_password,
            message: response.message,
        })
    }

    /// Drop the stored session. Purely local: the backend keeps no
    /// server-side session to revoke.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear_session().map_err(AuthError::Storage)?;
        info!("🚪 Logged out");
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, AuthError> {
        self.api.register(request).await
    }

    pub async fn send_otp(&self, email: &str) -> Result<ApiMessage, AuthError> {
        self.api.send_otp(email).await
    }

    pub async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<ApiMessage, AuthError> {
        self.api.verify_otp(request).await
    }

    pub async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ApiMessage, AuthError> {
        self.api.reset_password(request).await
    }

    /// `Authorization` header value for authenticated requests, when a
    /// session is stored.
    pub fn bearer_header(&self) -> Option<String> {
        self.store
            .session()
            .token
            .map(|token| format!("Bearer {}", token))
    }
}
