//! Auth Wire Models
//! Mission: Request/response shapes for the backend's public auth endpoints

use serde::{Deserialize, Serialize};

/// Credentials for `POST /public/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Reply from `POST /public/login`. The backend serializes camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// The account is still on its emailed temporary password.
    #[serde(default)]
    pub must_reset_password: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

/// Payload for `POST /public/users/register`. Registration creates a
/// pending account; a verification code follows by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// Payload for `POST /public/verify-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Payload for `POST /public/reset-password`. Trades the emailed temporary
/// password for a caller-chosen one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub username: String,
    pub temp_password: String,
    pub new_password: String,
}

/// Generic `{message, success}` reply used by the OTP and password
/// endpoints. Some endpoints answer with a bare string; the client wraps
/// that as the message.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
}

/// Errors from the auth flows.
#[derive(Debug)]
pub enum AuthError {
    /// The backend answered the login with `success == false`.
    LoginRejected(String),
    /// A success reply arrived without a token or role.
    IncompleteCredentials,
    /// A success reply carried a role string the client does not know.
    UnexpectedRole(String),
    /// Non-2xx reply from an auth endpoint.
    Api { status: u16, message: String },
    /// Transport failure talking to the backend.
    Transport(reqwest::Error),
    /// The session store failed to persist the credentials.
    Storage(anyhow::Error),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::LoginRejected(message) => write!(f, "Login rejected: {}", message),
            AuthError::IncompleteCredentials => {
                write!(f, "Login reply was missing the token or role")
            }
            AuthError::UnexpectedRole(role) => {
                write!(f, "Unknown role in login reply: {}", role)
            }
            AuthError::Api { status, message } => write!(f, "API error {}: {}", status, message),
            AuthError::Transport(e) => write!(f, "Transport error: {}", e),
            AuthError::Storage(e) => write!(f, "Session storage error: {}", e),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_deserializes_backend_camel_case() {
        let json = r#"{
            "success": true,
            "message": "Login successful",
            "mustResetPassword": true,
            "role": "ROLE_USER",
            "token": "abc123"
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert!(response.must_reset_password);
        assert_eq!(response.role.as_deref(), Some("ROLE_USER"));
        assert_eq!(response.token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_login_response_tolerates_null_fields() {
        let json = r#"{
            "success": false,
            "message": "Invalid username or password",
            "mustResetPassword": false,
            "role": null,
            "token": null
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.role, None);
        assert_eq!(response.token, None);
    }

    #[test]
    fn test_register_request_serializes_camel_case() {
        let request = RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5550100".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["fullName"], "Ada Lovelace");
        assert_eq!(json["email"], "ada@example.com");
        assert_eq!(json["phone"], "5550100");
    }

    #[test]
    fn test_reset_password_request_serializes_camel_case() {
        let request = ResetPasswordRequest {
            username: "ada@example.com".to_string(),
            temp_password: "temp123".to_string(),
            new_password: "s3cure!pass".to_string(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["tempPassword"], "temp123");
        assert_eq!(json["newPassword"], "s3cure!pass");
    }

    #[test]
    fn test_api_message_parses_both_shapes() {
        let with_flag: ApiMessage =
            serde_json::from_str(r#"{"message": "OTP verified", "success": true}"#).unwrap();
        assert_eq!(with_flag.message.as_deref(), Some("OTP verified"));
        assert_eq!(with_flag.success, Some(true));

        let message_only: ApiMessage =
            serde_json::from_str(r#"{"message": "OTP sent successfully to ada@example.com"}"#)
                .unwrap();
        assert_eq!(message_only.success, None);
    }

    #[test]
    fn test_auth_error_display() {
        let rejected = AuthError::LoginRejected("Invalid username or password".to_string());
        assert_eq!(
            rejected.to_string(),
            "Login rejected: Invalid username or password"
        );

        let api = AuthError::Api {
            status: 400,
            message: "Invalid OTP".to_string(),
        };
        assert_eq!(api.to_string(), "API error 400: Invalid OTP");
    }
}
