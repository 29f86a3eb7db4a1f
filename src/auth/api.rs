//! Auth API Client
//! Mission: Call the backend's public auth endpoints

use crate::auth::models::{
    ApiMessage, AuthError, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// One method per public auth endpoint. Implemented over HTTP in
/// production; tests substitute an in-process fake.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError>;
    async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, AuthError>;
    async fn send_otp(&self, email: &str) -> Result<ApiMessage, AuthError>;
    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<ApiMessage, AuthError>;
    async fn reset_password(&self, request: &ResetPasswordRequest)
        -> Result<ApiMessage, AuthError>;
}

/// HTTP client for the backend's `/public/*` auth endpoints.
#[derive(Clone)]
pub struct HttpAuthApi {
    client: Client,
    base_url: String,
}

impl HttpAuthApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build auth HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    #[inline]
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a JSON body and read one of the `{message}` / `{message,
    /// success}` replies. Endpoints that answer with a bare string get that
    /// string wrapped as the message.
    async fn post_for_message<B>(&self, path: &str, body: &B) -> Result<ApiMessage, AuthError>
    where
        B: Serialize + Sync,
    {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = resp.status();
        let text = resp.text().await.map_err(AuthError::Transport)?;

        if !status.is_success() {
            return Err(api_error(status, &text));
        }

        debug!("POST {} -> {}", path, status);
        Ok(message_from_body(&text))
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let resp = self
            .client
            .post(self.url("/public/login"))
            .json(request)
            .send()
            .await
            .map_err(AuthError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(api_error(status, &text));
        }

        resp.json::<LoginResponse>()
            .await
            .map_err(AuthError::Transport)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, AuthError> {
        self.post_for_message("/public/users/register", request)
            .await
    }

    async fn send_otp(&self, email: &str) -> Result<ApiMessage, AuthError> {
        self.post_for_message("/public/send-otp", &json!({ "email": email }))
            .await
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<ApiMessage, AuthError> {
        self.post_for_message("/public/verify-otp", request).await
    }

    async fn reset_password(
        &self,
        request: &ResetPasswordRequest,
    ) -> Result<ApiMessage, AuthError> {
        self.post_for_message("/public/reset-password", request)
            .await
    }
}

/// Read a reply body as `ApiMessage`. Non-JSON bodies become the message.
fn message_from_body(text: &str) -> ApiMessage {
    if let Ok(message) = serde_json::from_str::<ApiMessage>(text) {
        return message;
    }
    let trimmed = text.trim();
    ApiMessage {
        message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
        success: None,
    }
}

/// Typed error for a non-2xx reply, preferring the body's `message` field
/// over raw text.
fn api_error(status: StatusCode, body: &str) -> AuthError {
    let message = message_from_body(body).message.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    });

    AuthError::Api {
        status: status.as_u16(),
        message,
    }
}
