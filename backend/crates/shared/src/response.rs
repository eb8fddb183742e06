//! Response Envelope
//!
//! The JSON envelope every endpoint returns:
//! - success: `{"success": true, "data": ..., "message": ...}`
//! - failure: `{"success": false, "code": ..., "message": ..., "errors": [...]}`
//!
//! Status codes are set by the caller; the envelope shape is fixed here
//! so success and error bodies stay consistent across domains.

use serde::Serialize;

use crate::error::app_error::{AppError, FieldError};

/// 成功レスポンスのエンベロープ
///
/// `data` と `message` は省略可能で、`None` の場合は JSON から除外されます。
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let body = ApiResponse::ok(serde_json::json!({"email": "a@x.com"}));
/// let json = serde_json::to_string(&body).unwrap();
/// assert!(json.contains("\"success\":true"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// データ付きの成功レスポンス
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// データとメッセージ付きの成功レスポンス
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// データなしの成功レスポンス
    pub fn empty() -> Self {
        Self {
            success: true,
            message: None,
            data: None,
        }
    }
}

/// エラーレスポンスのエンベロープ
///
/// [`AppError`] から構築され、内部情報（source）は含まれません。
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            success: false,
            code: err.code().to_string(),
            message: err.message().to_string(),
            errors: err.field_errors().to_vec(),
        }
    }
}
