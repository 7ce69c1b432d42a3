use taskhub_core::error::AppError;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("missing or malformed authorization header")]
    MissingCredentials,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account no longer exists")]
    UnknownIdentity,

    #[error("authentication required")]
    AuthenticationRequired,

    #[error("insufficient permissions")]
    InsufficientPermissions,

    #[error("email already registered")]
    EmailAlreadyRegistered,

    #[error("user not found")]
    UserNotFound,
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Store(e) => AppError::StoreError(anyhow::anyhow!(e)),
            ServiceError::Internal(e) => AppError::InternalError(e),
            ServiceError::MissingCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Missing or malformed authorization header"))
            }
            ServiceError::InvalidToken => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid or expired token"))
            }
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized(anyhow::anyhow!("Invalid credentials"))
            }
            ServiceError::UnknownIdentity => {
                AppError::Unauthorized(anyhow::anyhow!("Account no longer exists"))
            }
            ServiceError::AuthenticationRequired => {
                AppError::Unauthorized(anyhow::anyhow!("Authentication required"))
            }
            ServiceError::InsufficientPermissions => {
                AppError::Forbidden(anyhow::anyhow!("Insufficient permissions"))
            }
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict(anyhow::anyhow!("Email already registered"))
            }
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
        }
    }
}
