//! Authorization Gate
//!
//! A single middleware that runs on every request. It hydrates the
//! principal from the session cookie, stores it in request extensions,
//! and then checks the route against an ordered rule table. First match
//! wins; a request matching no rule is rejected as unauthenticated
//! rather than let through.

use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::principal::Principal;
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::UserRole;
use crate::error::AuthError;

/// Access requirement for a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, authenticated or not
    Permit,
    /// Any authenticated principal
    Authenticated,
    /// Authenticated principal with at least this role
    Role(UserRole),
}

/// Path matcher for a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly
    Exact(String),
    /// Matches the path itself and anything below it
    Prefix(String),
}

impl PathPattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == p,
            PathPattern::Prefix(p) => {
                path == p || (path.starts_with(p) && path[p.len()..].starts_with('/'))
            }
        }
    }
}

/// One entry in the rule table
#[derive(Debug, Clone)]
pub struct RouteRule {
    pattern: PathPattern,
    access: Access,
}

/// Ordered rule table with a default-deny tail
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<RouteRule>,
}

impl AccessPolicy {
    /// Empty policy; every request is denied until rules are added
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn permit(mut self, pattern: PathPattern) -> Self {
        self.rules.push(RouteRule {
            pattern,
            access: Access::Permit,
        });
        self
    }

    pub fn authenticated(mut self, pattern: PathPattern) -> Self {
        self.rules.push(RouteRule {
            pattern,
            access: Access::Authenticated,
        });
        self
    }

    pub fn role(mut self, pattern: PathPattern, role: UserRole) -> Self {
        self.rules.push(RouteRule {
            pattern,
            access: Access::Role(role),
        });
        self
    }

    /// Decide whether a request may proceed
    ///
    /// Anonymous callers get 401, authenticated callers lacking the
    /// required role get 403. No matching rule behaves like an
    /// authenticated-only rule.
    pub fn decide(&self, path: &str, principal: Option<&Principal>) -> Result<(), AuthError> {
        let access = self
            .rules
            .iter()
            .find(|rule| rule.pattern.matches(path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated);

        match access {
            Access::Permit => Ok(()),
            Access::Authenticated => match principal {
                Some(_) => Ok(()),
                None => Err(AuthError::Unauthorized),
            },
            Access::Role(required) => match principal {
                None => Err(AuthError::Unauthorized),
                Some(p) if p.satisfies(required) => Ok(()),
                Some(_) => Err(AuthError::Forbidden),
            },
        }
    }
}

impl Default for AccessPolicy {
    /// The standard rule table:
    /// - static/public paths and the auth endpoints are open
    /// - `/api/admin/**` requires the Admin role
    /// - everything else requires authentication
    fn default() -> Self {
        Self::new()
            .permit(PathPattern::Prefix("/public".to_string()))
            .permit(PathPattern::Exact("/favicon.ico".to_string()))
            .permit(PathPattern::Exact("/healthz".to_string()))
            .permit(PathPattern::Exact("/api/auth/signup".to_string()))
            .permit(PathPattern::Exact("/api/auth/login".to_string()))
            .permit(PathPattern::Exact("/api/auth/logout".to_string()))
            .role(
                PathPattern::Prefix("/api/admin".to_string()),
                UserRole::Admin,
            )
            .authenticated(PathPattern::Exact("/api/auth/me".to_string()))
    }
}

/// State for the gate middleware
#[derive(Clone)]
pub struct GateState<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub session_repo: Arc<S>,
    pub config: Arc<AuthConfig>,
    pub policy: Arc<AccessPolicy>,
}

/// Gate middleware
///
/// Hydration happens before the rule check so even public routes see the
/// principal when a valid cookie is present.
pub async fn enforce_access<S>(
    state: GateState<S>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.session_repo.clone(), state.config.clone());

    let principal = match use_case.hydrate(token.as_deref()).await {
        Ok(principal) => principal,
        Err(e) => return Err(e.into_response()),
    };

    if let Some(ref principal) = principal {
        req.extensions_mut().insert(principal.clone());
    }

    let path = req.uri().path().to_string();
    if let Err(e) = state.policy.decide(&path, principal.as_ref()) {
        return Err(e.into_response());
    }

    Ok(next.run(req).await)
}
