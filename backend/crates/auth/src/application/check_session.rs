//! Check Session Use Case
//!
//! Turns an incoming cookie token into an authenticated principal. This
//! runs on every request (via the access gate), so it stays a single
//! indexed lookup.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::principal::Principal;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Hydrate a principal from an optional cookie token
    ///
    /// Returns `None` for missing, malformed, unknown, or expired tokens.
    /// Hydration failure is not an error by itself; whether anonymous
    /// access is acceptable is the gate's decision, made per route.
    pub async fn hydrate(&self, session_token: Option<&str>) -> AuthResult<Option<Principal>> {
        let Some(token) = session_token else {
            return Ok(None);
        };

        let Ok(session_id) = verify_session_token(token, &self.config.session_secret) else {
            tracing::debug!("Session token failed verification");
            return Ok(None);
        };

        let Some(session) = self.session_repo.find_by_id(&session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            // Lazy cleanup; the periodic sweep catches the rest
            self.session_repo.delete(&session.session_id).await?;
            tracing::debug!(session_id = %session.session_id, "Expired session removed");
            return Ok(None);
        }

        Ok(Some(session.principal()))
    }
}
