//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod payment_handler;
pub mod wallet_handler;

use crate::errors::AppError;

/// Fallback for known paths hit with an unsupported method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
