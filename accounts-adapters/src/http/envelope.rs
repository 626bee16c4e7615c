use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Field name → error messages, as rendered under `errors` in the envelope.
/// Cross-field failures go under `non_field_errors`.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// The fixed response shape shared by every endpoint:
/// `{success, message, data?, errors?}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

pub fn success(message: &str, data: Option<Value>) -> (StatusCode, Json<ApiResponse>) {
    success_with_status(StatusCode::OK, message, data)
}

pub fn created(message: &str, data: Option<Value>) -> (StatusCode, Json<ApiResponse>) {
    success_with_status(StatusCode::CREATED, message, data)
}

fn success_with_status(
    status: StatusCode,
    message: &str,
    data: Option<Value>,
) -> (StatusCode, Json<ApiResponse>) {
    (
        status,
        Json(ApiResponse {
            success: true,
            message: message.to_string(),
            data,
            errors: None,
        }),
    )
}
