//! Crate-level integration tests
//!
//! Use cases and the router are exercised against an in-memory
//! repository so the full signup/login/logout/me flows run without a
//! database.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use tower::ServiceExt;

use platform::password::ClearTextPassword;

use crate::application::config::{AuthConfig, SessionLimitPolicy};
use crate::application::session_token::sign_session_token;
use crate::application::{
    CheckSessionUseCase, CurrentUserUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{Email, Nickname, SessionId, UserId, UserRole};
use crate::error::{AuthError, AuthResult};
use crate::presentation::gate::{AccessPolicy, GateState, enforce_access};
use crate::presentation::router::auth_router_generic;

// ============================================================================
// In-Memory Repository
// ============================================================================

#[derive(Clone, Default)]
struct MemoryRepo {
    users: Arc<Mutex<Vec<User>>>,
    sessions: Arc<Mutex<Vec<SessionRecord>>>,
}

impl MemoryRepo {
    fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }
}

impl UserRepository for MemoryRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.lock().unwrap();
        // Mirrors the database unique indexes
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::DuplicateEmail);
        }
        if users
            .iter()
            .any(|u| u.nickname.canonical() == user.nickname.canonical())
        {
            return Err(AuthError::DuplicateNickname);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| u.email == *email))
    }

    async fn exists_by_nickname(&self, canonical: &str) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.nickname.canonical() == canonical))
    }
}

impl SessionRepository for MemoryRepo {
    async fn create(&self, session: &SessionRecord) -> AuthResult<()> {
        self.sessions.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<SessionRecord>> {
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.session_id == *session_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<SessionRecord>> {
        let mut sessions: Vec<SessionRecord> = self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.user_id == *user_id)
            .cloned()
            .collect();
        // Oldest first, like the SQL ORDER BY created_at
        sessions.sort_by_key(|s| (s.created_at, *s.session_id.as_uuid()));
        Ok(sessions)
    }

    async fn delete(&self, session_id: &SessionId) -> AuthResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .retain(|s| s.session_id != *session_id);
        Ok(())
    }

    async fn delete_expired(&self) -> AuthResult<u64> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let mut sessions = self.sessions.lock().unwrap();
        let before = sessions.len();
        sessions.retain(|s| s.expires_at_ms >= now_ms);
        Ok((before - sessions.len()) as u64)
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> AuthConfig {
    AuthConfig {
        session_secret: [42u8; 32],
        cookie_secure: false,
        ..AuthConfig::default()
    }
}

async fn sign_up(
    repo: &MemoryRepo,
    config: &Arc<AuthConfig>,
    email: &str,
    nickname: &str,
    password: &str,
) -> AuthResult<()> {
    let use_case = SignUpUseCase::new(Arc::new(repo.clone()), config.clone());
    use_case
        .execute(SignUpInput {
            email: Email::new(email).unwrap(),
            password: ClearTextPassword::new(password.to_string()).unwrap(),
            nickname: Nickname::new(nickname).unwrap(),
            phone: None,
            gender: None,
        })
        .await?;
    Ok(())
}

async fn sign_in(
    repo: &MemoryRepo,
    config: &Arc<AuthConfig>,
    email: &str,
    password: &str,
) -> AuthResult<String> {
    let use_case = SignInUseCase::new(
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
        config.clone(),
    );
    let output = use_case
        .execute(SignInInput {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await?;
    Ok(output.session_token)
}

async fn hydrate(
    repo: &MemoryRepo,
    config: &Arc<AuthConfig>,
    token: Option<&str>,
) -> Option<crate::domain::principal::Principal> {
    CheckSessionUseCase::new(Arc::new(repo.clone()), config.clone())
        .hydrate(token)
        .await
        .unwrap()
}

// ============================================================================
// Use Case Flows
// ============================================================================

#[tokio::test]
async fn signup_rejects_duplicate_email_and_nickname() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();

    let err = sign_up(&repo, &config, "a@example.com", "other", "password1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateEmail));

    // Nickname uniqueness is case-insensitive via the canonical form
    let err = sign_up(&repo, &config, "b@example.com", "ALICE", "password1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DuplicateNickname));
}

#[tokio::test]
async fn login_creates_session_and_me_returns_profile() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();

    let token = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(repo.session_count(), 1);

    let principal = hydrate(&repo, &config, Some(&token)).await.unwrap();
    assert_eq!(principal.email.as_str(), "a@example.com");
    assert_eq!(principal.role, UserRole::User);

    let me = CurrentUserUseCase::new(Arc::new(repo.clone()))
        .execute(&principal)
        .await
        .unwrap();
    assert_eq!(me.email, "a@example.com");
    assert_eq!(me.nickname, "alice");
}

#[tokio::test]
async fn login_with_wrong_password_fails_without_session() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();
    sign_up(&repo, &config, "b@example.com", "bob", "password2")
        .await
        .unwrap();

    let bob_token = sign_in(&repo, &config, "b@example.com", "password2")
        .await
        .unwrap();

    let err = sign_in(&repo, &config, "a@example.com", "wrongpassword")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidPassword));

    // Bob's session is untouched by Alice's failed login
    assert_eq!(repo.session_count(), 1);
    assert!(hydrate(&repo, &config, Some(&bob_token)).await.is_some());

    // A policy-violating password can never match either
    let err = sign_in(&repo, &config, "a@example.com", "p1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidPassword));
}

#[tokio::test]
async fn login_with_unknown_email_fails() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    let err = sign_in(&repo, &config, "nobody@example.com", "password1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::NotFoundUser));
}

#[tokio::test]
async fn evict_oldest_policy_keeps_session_count_at_limit() {
    let repo = MemoryRepo::default();
    let config = Arc::new(AuthConfig {
        max_sessions_per_user: 1,
        session_limit_policy: SessionLimitPolicy::EvictOldest,
        ..test_config()
    });

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();

    let first = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();
    let second = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();

    assert_eq!(repo.session_count(), 1);
    assert!(hydrate(&repo, &config, Some(&first)).await.is_none());
    assert!(hydrate(&repo, &config, Some(&second)).await.is_some());
}

#[tokio::test]
async fn refuse_new_policy_rejects_second_login() {
    let repo = MemoryRepo::default();
    let config = Arc::new(AuthConfig {
        max_sessions_per_user: 1,
        session_limit_policy: SessionLimitPolicy::RefuseNew,
        ..test_config()
    });

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();

    let first = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();

    let err = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::SessionLimitReached));

    // The existing session is untouched
    assert_eq!(repo.session_count(), 1);
    assert!(hydrate(&repo, &config, Some(&first)).await.is_some());
}

#[tokio::test]
async fn expired_sessions_do_not_count_toward_the_limit() {
    let repo = MemoryRepo::default();
    let config = Arc::new(AuthConfig {
        max_sessions_per_user: 1,
        session_limit_policy: SessionLimitPolicy::RefuseNew,
        ..test_config()
    });

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();
    let user = UserRepository::find_by_email(&repo, &Email::new("a@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    // An abandoned session whose cookie is never presented again, so
    // hydration-time cleanup never ran
    let mut stale = SessionRecord::new(&user.principal(), chrono::Duration::hours(1));
    stale.expires_at_ms = chrono::Utc::now().timestamp_millis() - 1000;
    SessionRepository::create(&repo, &stale).await.unwrap();

    // The new login succeeds and the stale row is gone
    let token = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();
    assert_eq!(repo.session_count(), 1);
    assert!(hydrate(&repo, &config, Some(&token)).await.is_some());
}

#[tokio::test]
async fn logout_invalidates_session_and_is_idempotent() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();
    let token = sign_in(&repo, &config, "a@example.com", "password1")
        .await
        .unwrap();

    let use_case = SignOutUseCase::new(Arc::new(repo.clone()), config.clone());
    use_case.execute(&token).await.unwrap();
    assert_eq!(repo.session_count(), 0);
    assert!(hydrate(&repo, &config, Some(&token)).await.is_none());

    // Signing out again, or with garbage, still succeeds
    use_case.execute(&token).await.unwrap();
    use_case.execute("garbage-token").await.unwrap();
}

#[tokio::test]
async fn expired_session_is_removed_on_hydration() {
    let repo = MemoryRepo::default();
    let config = Arc::new(test_config());

    sign_up(&repo, &config, "a@example.com", "alice", "password1")
        .await
        .unwrap();
    let user = UserRepository::find_by_email(&repo, &Email::new("a@example.com").unwrap())
        .await
        .unwrap()
        .unwrap();

    let mut session = SessionRecord::new(&user.principal(), chrono::Duration::hours(1));
    session.expires_at_ms = chrono::Utc::now().timestamp_millis() - 1000;
    SessionRepository::create(&repo, &session).await.unwrap();

    let token = sign_session_token(&session.session_id, &config.session_secret);
    assert!(hydrate(&repo, &config, Some(&token)).await.is_none());

    // Lazy cleanup removed the row
    assert_eq!(repo.session_count(), 0);
}

// ============================================================================
// HTTP Round Trips (router + gate)
// ============================================================================

fn test_app(repo: MemoryRepo, config: AuthConfig) -> Router {
    let gate_state = GateState {
        session_repo: Arc::new(repo.clone()),
        config: Arc::new(config.clone()),
        policy: Arc::new(AccessPolicy::default()),
    };

    Router::new()
        .nest("/api/auth", auth_router_generic(repo, config))
        .route("/api/admin/users", get(|| async { "admin only" }))
        .route("/healthz", get(|| async { "ok" }))
        .layer(axum::middleware::from_fn(move |req, next| {
            let state = gate_state.clone();
            async move { enforce_access(state, req, next).await }
        }))
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn full_http_flow() {
    let repo = MemoryRepo::default();
    let config = test_config();
    let app = test_app(repo.clone(), config);

    // Signup
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            serde_json::json!({
                "email": "a@example.com",
                "password": "password1",
                "nickname": "alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["email"], "a@example.com");

    // Login sets the session cookie
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"email": "a@example.com", "password": "password1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth_session="));
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();

    // Me with the cookie
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["nickname"], "alice");

    // Logout clears the cookie and kills the session
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("Max-Age=0")
    );
    assert_eq!(repo.session_count(), 0);

    // The old cookie no longer authenticates
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn gate_enforces_rule_table_over_http() {
    let repo = MemoryRepo::default();
    let config = test_config();
    let app = test_app(repo.clone(), config);

    // Public route needs no session
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Anonymous me is rejected with the error envelope
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");

    // A regular user is forbidden from admin routes
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            serde_json::json!({
                "email": "a@example.com",
                "password": "password1",
                "nickname": "alice"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({"email": "a@example.com", "password": "password1"}),
        ))
        .await
        .unwrap();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/admin/users")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn validation_errors_use_field_error_envelope() {
    let repo = MemoryRepo::default();
    let app = test_app(repo, test_config());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            serde_json::json!({
                "email": "not-an-email",
                "password": "short",
                "nickname": "x"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn duplicate_email_maps_to_conflict_over_http() {
    let repo = MemoryRepo::default();
    let app = test_app(repo, test_config());

    let signup = serde_json::json!({
        "email": "a@example.com",
        "password": "password1",
        "nickname": "alice"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/signup", signup.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(json_request("POST", "/api/auth/signup", signup))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "DUPLICATE_EMAIL");
}
