//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::{AuthConfig, SessionLimitPolicy};
use crate::application::session_token::sign_session_token;
use crate::domain::entity::session::SessionRecord;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for the cookie
    pub session_token: String,
    pub email: String,
    pub nickname: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // An unparseable email cannot belong to any account
        let email = Email::new(&input.email).map_err(|_| AuthError::NotFoundUser)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NotFoundUser)?;

        // A password that fails the policy can never match a stored hash
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidPassword)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidPassword);
        }

        self.enforce_session_limit(&user.user_id).await?;

        // Always a fresh session ID, never one the client presented before
        let session = SessionRecord::new(&user.principal(), self.config.session_ttl_chrono());
        self.session_repo.create(&session).await?;

        let session_token = sign_session_token(&session.session_id, &self.config.session_secret);

        tracing::info!(user_id = %user.user_id, session_id = %session.session_id, "User signed in");

        Ok(SignInOutput {
            session_token,
            email: user.email.as_str().to_string(),
            nickname: user.nickname.original().to_string(),
        })
    }

    /// Apply the concurrent-session limit before creating a new session
    async fn enforce_session_limit(
        &self,
        user_id: &crate::domain::value_object::UserId,
    ) -> AuthResult<()> {
        let max = self.config.max_sessions_per_user;
        if max == 0 {
            // Zero means unlimited
            return Ok(());
        }

        // Only live sessions count toward the limit; expired rows are
        // removed here since lazy cleanup never sees abandoned cookies
        let mut live = Vec::new();
        for session in self.session_repo.find_by_user_id(user_id).await? {
            if session.is_expired() {
                self.session_repo.delete(&session.session_id).await?;
            } else {
                live.push(session);
            }
        }

        if live.len() < max {
            return Ok(());
        }

        match self.config.session_limit_policy {
            SessionLimitPolicy::RefuseNew => Err(AuthError::SessionLimitReached),
            SessionLimitPolicy::EvictOldest => {
                // Sessions come back oldest first; keep max - 1 newest
                let excess = live.len() + 1 - max;
                for session in live.iter().take(excess) {
                    self.session_repo.delete(&session.session_id).await?;
                    tracing::debug!(
                        session_id = %session.session_id,
                        "Evicted oldest session at login"
                    );
                }
                Ok(())
            }
        }
    }
}
