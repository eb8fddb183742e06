//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::response::ApiResponse;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CurrentUserUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::principal::Principal;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{AppUserResponse, SignInRequest, SignUpRequest};
use crate::presentation::validation::{validate_sign_in, validate_sign_up};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let valid = validate_sign_up(req)?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: valid.email,
            password: valid.password,
            nickname: valid.nickname,
            phone: valid.phone,
            gender: valid.gender,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok_with_message(
            AppUserResponse {
                email: output.email,
                nickname: output.nickname,
            },
            "Signup successful",
        )),
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/login
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let valid = validate_sign_in(req)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: valid.email,
            password: valid.password,
        })
        .await?;

    let cookie = state
        .config
        .cookie_config()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::ok_with_message(
            AppUserResponse {
                email: output.email,
                nickname: output.nickname,
            },
            "Login successful",
        )),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/logout
///
/// Always clears the cookie, even when no valid session was attached.
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        use_case.execute(&token).await?;
    }

    let cookie = state.config.cookie_config().build_delete_cookie();

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /api/auth/me
///
/// The principal is put into request extensions by the access gate. A
/// missing extension (router mounted without the gate) maps to 401.
pub async fn current_user<R>(
    State(state): State<AuthAppState<R>>,
    principal: Option<axum::Extension<Principal>>,
) -> AuthResult<Json<ApiResponse<AppUserResponse>>>
where
    R: UserRepository + SessionRepository + Clone + Send + Sync + 'static,
{
    let axum::Extension(principal) = principal.ok_or(AuthError::Unauthorized)?;

    let use_case = CurrentUserUseCase::new(state.repo.clone());
    let output = use_case.execute(&principal).await?;

    Ok(Json(ApiResponse::ok(AppUserResponse {
        email: output.email,
        nickname: output.nickname,
    })))
}
