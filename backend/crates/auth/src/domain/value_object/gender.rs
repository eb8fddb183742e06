//! Gender Value Object
//!
//! Optional profile attribute. Stored as a text code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Storage/wire code
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Gender::Male => "MALE",
            Gender::Female => "FEMALE",
        }
    }

    /// Parse from a code, case-insensitively
    ///
    /// Returns `None` for unknown values; the caller turns that into a
    /// field-level validation error.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_from_code() {
        assert_eq!(Gender::from_code("MALE"), Some(Gender::Male));
        assert_eq!(Gender::from_code("female"), Some(Gender::Female));
        assert_eq!(Gender::from_code("  Male "), Some(Gender::Male));
        assert_eq!(Gender::from_code("other"), None);
        assert_eq!(Gender::from_code(""), None);
    }

    #[test]
    fn test_gender_code_round_trip() {
        for g in [Gender::Male, Gender::Female] {
            assert_eq!(Gender::from_code(g.code()), Some(g));
        }
    }
}
