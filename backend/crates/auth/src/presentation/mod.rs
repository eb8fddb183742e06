//! Presentation Layer
//!
//! HTTP handlers, DTOs, request validation, the authorization gate, and
//! the router.

pub mod dto;
pub mod gate;
pub mod handlers;
pub mod router;
pub mod validation;
