use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Invalid pad character: {0:?}")]
    InvalidPadCharacter(char),

    #[error("Invalid character guessed: {0:?}")]
    InvalidCharacterGuessed(char),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::MalformedToken(_) => (
                StatusCode::BAD_REQUEST,
                "MALFORMED_TOKEN",
                "The game token could not be decoded. Start a new game.".to_string(),
            ),
            AppError::InvalidCharacterGuessed(c) => (
                StatusCode::BAD_REQUEST,
                "INVALID_CHARACTER",
                format!("Character {:?} is not part of the playable alphabet", c),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidPadCharacter(_) | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                self.to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let details = match &self {
            AppError::MalformedToken(reason) => Some(serde_json::json!({ "reason": reason })),
            _ => None,
        };

        let body = Json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_token_maps_to_bad_request() {
        let response = AppError::MalformedToken("missing delimiter".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_character_maps_to_bad_request() {
        let (status, code, message) = AppError::InvalidCharacterGuessed('!').parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "INVALID_CHARACTER");
        assert!(message.contains('!'));
    }

    #[test]
    fn pad_character_error_is_a_server_error() {
        let response = AppError::InvalidPadCharacter('A').into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
