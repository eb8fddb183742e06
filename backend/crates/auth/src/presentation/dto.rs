//! Request/Response DTOs

use serde::{Deserialize, Serialize};

/// Sign up request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// Sign in request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user account
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUserResponse {
    pub email: String,
    pub nickname: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_up_request_optional_fields_default() {
        let req: SignUpRequest = serde_json::from_str(
            r#"{"email":"a@x.com","password":"password1","nickname":"alice"}"#,
        )
        .unwrap();
        assert!(req.phone.is_none());
        assert!(req.gender.is_none());
    }

    #[test]
    fn test_app_user_response_shape() {
        let body = AppUserResponse {
            email: "a@x.com".to_string(),
            nickname: "alice".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["nickname"], "alice");
    }
}
