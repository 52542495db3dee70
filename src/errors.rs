use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShortenerError {
    #[error("Invalid destination URL: {0}")]
    InvalidDestination(String),

    #[error("Short URL not found")]
    NotFound,

    #[error("Email and password are required")]
    MissingField,

    #[error("A user with this email already exists")]
    EmailConflict,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Session token error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ShortenerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ShortenerError::InvalidDestination(_) | ShortenerError::MissingField => {
                StatusCode::BAD_REQUEST
            }
            ShortenerError::NotFound => StatusCode::NOT_FOUND,
            ShortenerError::EmailConflict => StatusCode::CONFLICT,
            ShortenerError::InvalidCredentials | ShortenerError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            ShortenerError::Hashing(_)
            | ShortenerError::Session(_)
            | ShortenerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Library failures are logged, not echoed back to the client
        let message = match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                log::error!("{}", self);
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

pub type Result<T> = std::result::Result<T, ShortenerError>;
