//! Integration tests for the session, guard and auth flows
//!
//! Drives the library surface end to end: a fake auth API feeds the session
//! store, the access guard gates the default route table, and a file-backed
//! store carries the session across a reopen.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ecovault_client::auth::models::{
    ApiMessage, AuthError, LoginRequest, LoginResponse, RegisterRequest, ResetPasswordRequest,
    VerifyOtpRequest,
};
use ecovault_client::auth::{AuthApi, AuthService};
use ecovault_client::guard::routes::{landing_path, Navigation, RouteAccess, RouteTable};
use ecovault_client::guard::{AccessGuard, GuardDecision, RedirectTarget};
use ecovault_client::session::{FileStorage, Role, SessionStore};

/// Replays canned login replies in order; the other endpoints answer with
/// fixed messages.
struct ScriptedAuthApi {
    login_replies: Mutex<Vec<LoginResponse>>,
}

impl ScriptedAuthApi {
    fn new(replies: Vec<LoginResponse>) -> Arc<Self> {
        Arc::new(Self {
            login_replies: Mutex::new(replies),
        })
    }
}

#[async_trait]
impl AuthApi for ScriptedAuthApi {
    async fn login(&self, _request: &LoginRequest) -> Result<LoginResponse, AuthError> {
        let mut replies = self.login_replies.lock();
        assert!(!replies.is_empty(), "no scripted login reply left");
        Ok(replies.remove(0))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<ApiMessage, AuthError> {
        Ok(ApiMessage {
            message: Some(format!("User registered: {}", request.email)),
            success: None,
        })
    }

    async fn send_otp(&self, email: &str) -> Result<ApiMessage, AuthError> {
        Ok(ApiMessage {
            message: Some(format!("OTP sent successfully to {}", email)),
            success: None,
        })
    }

    async fn verify_otp(&self, _request: &VerifyOtpRequest) -> Result<ApiMessage, AuthError> {
        Ok(ApiMessage {
            message: Some("Email Verified & Account Activated".to_string()),
            success: Some(true),
        })
    }

    async fn reset_password(
        &self,
        _request: &ResetPasswordRequest,
    ) -> Result<ApiMessage, AuthError> {
        Ok(ApiMessage {
            message: Some("Password updated.".to_string()),
            success: None,
        })
    }
}

fn login_reply(token: &str, role: &str) -> LoginResponse {
    LoginResponse {
        success: true,
        message: Some("Login successful".to_string()),
        must_reset_password: false,
        role: Some(role.to_string()),
        token: Some(token.to_string()),
    }
}

fn rejected_reply() -> LoginResponse {
    LoginResponse {
        success: false,
        message: Some("Invalid username or password".to_string()),
        must_reset_password: false,
        role: None,
        token: None,
    }
}

#[tokio::test]
async fn login_guard_logout_flow() {
    let store = Arc::new(SessionStore::in_memory());
    let guard = AccessGuard::new(Arc::clone(&store));
    let service = AuthService::new(
        ScriptedAuthApi::new(vec![login_reply("abc123", "ROLE_ADMIN")]),
        Arc::clone(&store),
    );

    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    let subscription = store.subscribe(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // Logged out: every requirement bounces to login.
    assert_eq!(
        guard.evaluate(Some(Role::Admin)),
        GuardDecision::Redirect(RedirectTarget::Login)
    );
    assert_eq!(
        guard.evaluate(None),
        GuardDecision::Redirect(RedirectTarget::Login)
    );

    let outcome = service.login("admin@ecovault.io", "hunter2").await.unwrap();
    assert_eq!(outcome.role, Role::Admin);
    assert_eq!(landing_path(outcome.role), "/admin");
    assert_eq!(notifications.load(Ordering::SeqCst), 1);

    // Logged in as admin: admin routes open, user routes bounce home.
    assert_eq!(guard.evaluate(Some(Role::Admin)), GuardDecision::Admitted);
    assert_eq!(guard.evaluate(None), GuardDecision::Admitted);
    assert_eq!(
        guard.evaluate(Some(Role::User)),
        GuardDecision::Redirect(RedirectTarget::Home)
    );
    assert_eq!(service.bearer_header().as_deref(), Some("Bearer abc123"));

    service.logout().unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
    assert_eq!(
        guard.evaluate(Some(Role::Admin)),
        GuardDecision::Redirect(RedirectTarget::Login)
    );
    assert_eq!(service.bearer_header(), None);

    // After unsubscribing, further changes stay silent.
    subscription.unsubscribe();
    store.set_session("def456", Role::User).unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rejected_login_keeps_the_previous_session() {
    let store = Arc::new(SessionStore::in_memory());
    let service = AuthService::new(
        ScriptedAuthApi::new(vec![
            login_reply("abc123", "ROLE_USER"),
            rejected_reply(),
        ]),
        Arc::clone(&store),
    );

    service.login("ada@example.com", "hunter2").await.unwrap();

    let err = service
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::LoginRejected(_)));

    // The earlier session is still intact.
    let session = store.session();
    assert_eq!(session.token.as_deref(), Some("abc123"));
    assert_eq!(session.role, Some(Role::User));
}

#[tokio::test]
async fn account_lifecycle_messages_pass_through() {
    let store = Arc::new(SessionStore::in_memory());
    let service = AuthService::new(ScriptedAuthApi::new(vec![]), Arc::clone(&store));

    let reply = service
        .register(&RegisterRequest {
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "5550100".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(
        reply.message.as_deref(),
        Some("User registered: ada@example.com")
    );

    let reply = service.send_otp("ada@example.com").await.unwrap();
    assert_eq!(
        reply.message.as_deref(),
        Some("OTP sent successfully to ada@example.com")
    );

    let reply = service
        .verify_otp(&VerifyOtpRequest {
            email: "ada@example.com".to_string(),
            otp: "431992".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(reply.success, Some(true));

    let reply = service
        .reset_password(&ResetPasswordRequest {
            username: "ada@example.com".to_string(),
            temp_password: "temp123".to_string(),
            new_password: "s3cure!pass".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(reply.message.as_deref(), Some("Password updated."));

    // None of these flows touch the session.
    assert!(!store.is_authenticated());
}

#[test]
fn session_survives_reopen_like_a_page_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let store = SessionStore::new(FileStorage::open(&path).unwrap());
        store.set_session("abc123", Role::Personnel).unwrap();
    }

    let store = SessionStore::new(FileStorage::open(&path).unwrap());
    let session = store.session();
    assert_eq!(session.token.as_deref(), Some("abc123"));
    assert_eq!(session.role, Some(Role::Personnel));

    // A guard over the reopened store admits the personnel dashboard.
    let store = Arc::new(store);
    let guard = AccessGuard::new(Arc::clone(&store));
    let table = RouteTable::ecovault_defaults();
    assert_eq!(
        table.check(&guard, "/personnel-dashboard"),
        Navigation::Rendered {
            path: "/personnel-dashboard".into()
        }
    );
}

#[test]
fn tampered_session_file_reads_as_logged_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = Arc::new(SessionStore::new(FileStorage::open(&path).unwrap()));
    assert!(!store.is_authenticated());

    let guard = AccessGuard::new(Arc::clone(&store));
    assert_eq!(
        guard.evaluate(None),
        GuardDecision::Redirect(RedirectTarget::Login)
    );
}

#[test]
fn default_routes_follow_the_session() {
    let store = Arc::new(SessionStore::in_memory());
    let guard = AccessGuard::new(Arc::clone(&store));
    let table = RouteTable::ecovault_defaults();

    // Visitor: public pages render, dashboards bounce to login.
    assert_eq!(
        table.check(&guard, "/services"),
        Navigation::Rendered {
            path: "/services".into()
        }
    );
    assert_eq!(
        table.check(&guard, "/dashboard"),
        Navigation::RedirectedTo {
            from: "/dashboard".into(),
            to: "/login".into()
        }
    );

    store.set_session("abc123", Role::User).unwrap();
    assert_eq!(
        table.check(&guard, "/dashboard"),
        Navigation::Rendered {
            path: "/dashboard".into()
        }
    );
    assert_eq!(
        table.check(&guard, "/admin"),
        Navigation::RedirectedTo {
            from: "/admin".into(),
            to: "/".into()
        }
    );
    assert_eq!(
        table.check(&guard, "/recycling-bins"),
        Navigation::NotFound {
            path: "/recycling-bins".into()
        }
    );

    // Logging out flips the same navigation back to the login bounce.
    store.clear_session().unwrap();
    assert_eq!(
        table.check(&guard, "/dashboard"),
        Navigation::RedirectedTo {
            from: "/dashboard".into(),
            to: "/login".into()
        }
    );
}

#[test]
fn misconfigured_table_loop_is_reported() {
    let store = Arc::new(SessionStore::in_memory());
    store.set_session("abc123", Role::User).unwrap();
    let guard = AccessGuard::new(Arc::clone(&store));

    // A guarded home route bounces the wrong role onto itself.
    let mut table = RouteTable::new();
    table.register("/", RouteAccess::Role(Role::Admin));
    table.register("/login", RouteAccess::Public);

    assert_eq!(
        table.check(&guard, "/"),
        Navigation::RedirectLoop { path: "/".into() }
    );
}
