//! Nickname Value Object
//!
//! Public display name. Uniqueness is enforced on the canonical form
//! (NFKC + lowercase) so visually identical names cannot coexist.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Minimum nickname length in characters
const NICKNAME_MIN_LENGTH: usize = 2;

/// Maximum nickname length in characters
const NICKNAME_MAX_LENGTH: usize = 20;

/// Nickname value object
///
/// Keeps the original form for display and the canonical form for
/// uniqueness checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nickname {
    original: String,
    canonical: String,
}

impl Nickname {
    /// Create a new nickname with validation
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let original = raw.into().trim().to_string();

        if original.is_empty() {
            return Err(AppError::bad_request("Nickname cannot be empty"));
        }

        let char_count = original.chars().count();
        if char_count < NICKNAME_MIN_LENGTH {
            return Err(AppError::bad_request(format!(
                "Nickname must be at least {} characters",
                NICKNAME_MIN_LENGTH
            )));
        }
        if char_count > NICKNAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Nickname must be at most {} characters",
                NICKNAME_MAX_LENGTH
            )));
        }

        // Interior whitespace and control characters are rejected
        if original.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(AppError::bad_request(
                "Nickname cannot contain whitespace or control characters",
            ));
        }

        let canonical = Self::canonicalize(&original);

        Ok(Self {
            original,
            canonical,
        })
    }

    /// Canonical form: NFKC normalization + lowercase
    fn canonicalize(name: &str) -> String {
        name.nfkc().collect::<String>().to_lowercase()
    }

    /// Create from database values (assumed already validated)
    pub fn from_db(original: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            canonical: canonical.into(),
        }
    }

    /// Get the display form
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical form used for uniqueness
    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl std::fmt::Display for Nickname {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}
