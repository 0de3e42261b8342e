// Models for order API responses
use serde_json::Value;

/// Decoded response body. Only `DELETE /myorders` answering 204 yields `Text`.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
    Json(Value),
    Text(String),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(v) => Some(v),
            ApiResponse::Text(_) => None,
        }
    }
}
