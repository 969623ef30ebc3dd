use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Domain-specific error types for the analytics engine.
/// The pricer itself never fails: degenerate inputs (expired, zero vol) are
/// domain states, not errors. Failures only come from boundary validation,
/// the remote transport, and configuration.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("analysis service error: {status} {body}")]
    Remote { status: u16, body: String },

    #[error("config error: {0}")]
    Config(String),
}

impl EngineError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status the analysis service answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EngineError::InvalidParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for EngineError {
    fn from(e: reqwest::Error) -> Self {
        EngineError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Network(e.to_string())
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_names_field() {
        let e = EngineError::invalid("option_legs[0].strike_price", "must be positive");
        let msg = e.to_string();
        assert!(msg.contains("option_legs[0].strike_price"), "message should name the field: {msg}");
        assert_eq!(e.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_transport_errors_are_server_errors() {
        let e = EngineError::Remote { status: 502, body: "bad gateway".into() };
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
