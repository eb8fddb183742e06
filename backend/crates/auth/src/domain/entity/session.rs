//! Auth Session Entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::principal::Principal;
use crate::domain::value_object::{Email, SessionId, UserId, UserRole};

/// Server-side session record
///
/// Holds a denormalized copy of the principal so request hydration does
/// not need to join against the users table. The expiry is stored as
/// epoch milliseconds.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub email: Email,
    pub role: UserRole,
    pub expires_at_ms: i64,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new session for a principal with the given lifetime
    ///
    /// A fresh session ID is always generated here, so a successful
    /// login never reuses an identifier a client has seen before.
    pub fn new(principal: &Principal, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: SessionId::new(),
            user_id: principal.user_id,
            email: principal.email.clone(),
            role: principal.role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
        }
    }

    /// Whether the session has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at_ms
    }

    /// Rebuild the principal this session was issued for
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.email.clone(), self.role)
    }
}
