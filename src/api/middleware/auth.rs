//! Session token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::User;
use crate::errors::AppError;

const MISSING_TOKEN: &str = "No autorizado. Falta el token de sesión.";

/// User resolved from the request's session token
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// Session authentication middleware.
///
/// Reads `Authorization: Bearer <token>`, resolves the owning user and
/// injects it into the request extensions as [`CurrentUser`].
pub async fn session_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::unauthorized(MISSING_TOKEN))?
        .to_string();

    let user = state.auth_service.authenticate(&token).await?;
    tracing::debug!(google_id = %user.google_id, "Session authenticated");

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}
