use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Body returned for every failed login, whatever the reason
pub const LOGIN_FAILED_MESSAGE: &str = "User Name or Password is Wrong!";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid username or password")]
    InvalidCredentials {
        /// Answer with 404 for wire compatibility with existing clients
        legacy_status: bool,
    },

    #[error("invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("validated token is missing claim `{0}`")]
    MissingClaim(&'static str),

    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),

    #[error("user store failure: {0}")]
    UserStore(anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials { legacy_status: true } => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials {
                legacy_status: false,
            } => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            AuthError::MissingClaim(_) | AuthError::Signing(_) | AuthError::UserStore(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AuthError::InvalidCredentials { .. } => (status, LOGIN_FAILED_MESSAGE).into_response(),
            AuthError::InvalidToken(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                status.into_response()
            }
            AuthError::MissingClaim(_) | AuthError::Signing(_) | AuthError::UserStore(_) => {
                tracing::error!("{}", self);
                (status, "Internal Server Error").into_response()
            }
        }
    }
}
