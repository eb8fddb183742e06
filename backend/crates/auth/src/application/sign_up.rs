//! Sign Up Use Case
//!
//! Registers a new user account.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{Email, Gender, Nickname};
use crate::error::{AuthError, AuthResult};

/// Sign up input
///
/// Fields are already-validated value objects; the presentation layer is
/// responsible for turning raw request strings into these.
pub struct SignUpInput {
    pub email: Email,
    pub password: ClearTextPassword,
    pub nickname: Nickname,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
}

/// Sign up output
pub struct SignUpOutput {
    pub email: String,
    pub nickname: String,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if self.user_repo.exists_by_email(&input.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        if self
            .user_repo
            .exists_by_nickname(input.nickname.canonical())
            .await?
        {
            return Err(AuthError::DuplicateNickname);
        }

        let password_hash = input
            .password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let user = User::new(
            input.email,
            password_hash,
            input.nickname,
            input.phone,
            input.gender,
        );

        // The unique indexes still back this up: a concurrent signup with
        // the same email or nickname surfaces as DuplicateEmail/Nickname
        // from the repository, not as a 500.
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.user_id, "User signed up");

        Ok(SignUpOutput {
            email: user.email.as_str().to_string(),
            nickname: user.nickname.original().to_string(),
        })
    }
}
