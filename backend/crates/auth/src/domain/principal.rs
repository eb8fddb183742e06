//! Authenticated Principal
//!
//! The identity attached to a request after session hydration. Carried in
//! request extensions so handlers and the access gate can read it without
//! touching the store again.

use crate::domain::value_object::{Email, UserId, UserRole};

/// Authenticated caller identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: UserId,
    pub email: Email,
    pub role: UserRole,
}

impl Principal {
    pub fn new(user_id: UserId, email: Email, role: UserRole) -> Self {
        Self {
            user_id,
            email,
            role,
        }
    }

    /// Whether this principal meets a role requirement
    #[inline]
    pub fn satisfies(&self, required: UserRole) -> bool {
        self.role.satisfies(required)
    }
}
