//! Domain Layer
//!
//! Contains entities, value objects, the Principal, and repository traits.

pub mod entity;
pub mod principal;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{session::SessionRecord, user::User};
pub use principal::Principal;
pub use repository::{SessionRepository, UserRepository};
