//! Current User Use Case
//!
//! Loads the account behind an authenticated principal.

use std::sync::Arc;

use crate::domain::principal::Principal;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Current user output
pub struct CurrentUserOutput {
    pub email: String,
    pub nickname: String,
}

/// Current user use case
pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Load the user's profile
    ///
    /// A valid session whose user row has since been deleted surfaces as
    /// NotFoundUser rather than a stale profile.
    pub async fn execute(&self, principal: &Principal) -> AuthResult<CurrentUserOutput> {
        let user = self
            .user_repo
            .find_by_id(&principal.user_id)
            .await?
            .ok_or(AuthError::NotFoundUser)?;

        Ok(CurrentUserOutput {
            email: user.email.as_str().to_string(),
            nickname: user.nickname.original().to_string(),
        })
    }
}
