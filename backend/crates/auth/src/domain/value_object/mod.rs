//! Value Object Module

pub mod email;
pub mod gender;
pub mod nickname;
pub mod user_role;

pub use email::Email;
pub use gender::Gender;
pub use nickname::Nickname;
pub use user_role::UserRole;

/// Typed user ID (UUID v7)
pub type UserId = kernel::id::UserId;

/// Typed session ID (UUID v7)
pub type SessionId = kernel::id::SessionId;
