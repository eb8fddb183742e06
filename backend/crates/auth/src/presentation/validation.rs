//! Request Validation
//!
//! Turns raw request DTOs into validated value objects. All field
//! failures for a request are collected and reported together, so the
//! client can fix everything in one round trip.

use kernel::error::app_error::FieldError;
use platform::password::ClearTextPassword;

use crate::domain::value_object::{Email, Gender, Nickname};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{SignInRequest, SignUpRequest};

const PHONE_MIN_LENGTH: usize = 7;
const PHONE_MAX_LENGTH: usize = 20;

/// Validated sign up payload
pub struct ValidSignUp {
    pub email: Email,
    pub password: ClearTextPassword,
    pub nickname: Nickname,
    pub phone: Option<String>,
    pub gender: Option<Gender>,
}

/// Validated sign in payload
pub struct ValidSignIn {
    pub email: String,
    pub password: String,
}

/// Validate a sign up request
pub fn validate_sign_up(req: SignUpRequest) -> AuthResult<ValidSignUp> {
    let mut errors: Vec<FieldError> = Vec::new();

    let email = match Email::new(&req.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(FieldError::new("email", e.message().to_string()));
            None
        }
    };

    let password = match ClearTextPassword::new(req.password) {
        Ok(password) => Some(password),
        Err(e) => {
            errors.push(FieldError::new("password", e.to_string()));
            None
        }
    };

    let nickname = match Nickname::new(&req.nickname) {
        Ok(nickname) => Some(nickname),
        Err(e) => {
            errors.push(FieldError::new("nickname", e.message().to_string()));
            None
        }
    };

    let phone = match validate_phone(req.phone.as_deref()) {
        Ok(phone) => phone,
        Err(message) => {
            errors.push(FieldError::new("phone", message));
            None
        }
    };

    let gender = match req.gender.as_deref().filter(|g| !g.trim().is_empty()) {
        None => None,
        Some(code) => match Gender::from_code(code) {
            Some(gender) => Some(gender),
            None => {
                errors.push(FieldError::new("gender", "Gender must be MALE or FEMALE"));
                None
            }
        },
    };

    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    // All fields are Some once errors is empty
    Ok(ValidSignUp {
        email: email.expect("validated"),
        password: password.expect("validated"),
        nickname: nickname.expect("validated"),
        phone,
        gender,
    })
}

/// Validate a sign in request
///
/// Only presence is checked here. Whether the credentials are correct is
/// the use case's call, with its own error codes.
pub fn validate_sign_in(req: SignInRequest) -> AuthResult<ValidSignIn> {
    let mut errors: Vec<FieldError> = Vec::new();

    if req.email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    }
    if req.password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    if !errors.is_empty() {
        return Err(AuthError::Validation(errors));
    }

    Ok(ValidSignIn {
        email: req.email,
        password: req.password,
    })
}

/// Validate an optional phone number
///
/// Blank values count as absent. Accepted characters are digits, '+',
/// '-', and spaces.
fn validate_phone(phone: Option<&str>) -> Result<Option<String>, String> {
    let Some(phone) = phone.map(str::trim).filter(|p| !p.is_empty()) else {
        return Ok(None);
    };

    let digit_count = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < PHONE_MIN_LENGTH || phone.len() > PHONE_MAX_LENGTH {
        return Err(format!(
            "Phone number must contain {} to {} characters",
            PHONE_MIN_LENGTH, PHONE_MAX_LENGTH
        ));
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err("Phone number contains invalid characters".to_string());
    }

    Ok(Some(phone.to_string()))
}
