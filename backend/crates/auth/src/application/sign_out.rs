//! Sign Out Use Case
//!
//! Invalidates a user session. Always succeeds from the client's point of
//! view; an invalid or already-deleted token still gets its cookie cleared.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::verify_session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the session the token points at
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let Ok(session_id) = verify_session_token(session_token, &self.config.session_secret)
        else {
            // Nothing to invalidate; logout stays idempotent
            return Ok(());
        };

        self.session_repo.delete(&session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
