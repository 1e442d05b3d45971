use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Incomplete profile: missing {0}")]
    IncompleteProfile(String),

    #[error("No hobbies selected")]
    NoHobbiesSelected,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Transient failures are worth another attempt; definitive answers
    /// (not found, bad input) are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Upstream(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Upstream(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            AppError::IncompleteProfile(_)
            | AppError::NoHobbiesSelected
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::LocationNotFound(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
