//! User Entity

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::principal::Principal;
use crate::domain::value_object::{Email, Gender, Nickname, UserId, UserRole};

/// Registered user account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub nickname: Nickname,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a fresh ID and the default role
    pub fn new(
        email: Email,
        password_hash: HashedPassword,
        nickname: Nickname,
        phone: Option<String>,
        gender: Option<Gender>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            nickname,
            phone,
            gender,
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// The identity this user presents once authenticated
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.email.clone(), self.role)
    }
}
