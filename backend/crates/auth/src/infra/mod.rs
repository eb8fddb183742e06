//! Infrastructure Layer
//!
//! Database-backed implementations of the repository traits.

pub mod postgres;

pub use postgres::PgAuthRepository;
