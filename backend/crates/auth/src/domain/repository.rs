//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{session::SessionRecord, user::User};
use crate::domain::value_object::{Email, SessionId, UserId};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if a nickname (canonical form) is already taken
    async fn exists_by_nickname(&self, canonical: &str) -> AuthResult<bool>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create(&self, session: &SessionRecord) -> AuthResult<()>;

    /// Find session by ID
    async fn find_by_id(&self, session_id: &SessionId) -> AuthResult<Option<SessionRecord>>;

    /// Find all sessions for a user, oldest first
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Vec<SessionRecord>>;

    /// Delete a session by ID
    async fn delete(&self, session_id: &SessionId) -> AuthResult<()>;

    /// Delete all expired sessions, returning how many were removed
    async fn delete_expired(&self) -> AuthResult<u64>;
}
