//! Authentication handlers.

use axum::{extract::State, response::Json};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::LoginResponse;
use crate::errors::AppResult;

/// Google sign-in request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct GoogleLoginRequest {
    /// Google ID token (credential) returned by Google Sign-In
    #[serde(default)]
    #[validate(length(min = 1, message = "Falta el token de Google."))]
    pub token: String,
}

/// Sign in with a Google ID token
#[utoipa::path(
    post,
    path = "/api/auth/google",
    tag = "Authentication",
    request_body = GoogleLoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Missing token or malformed body"),
        (status = 401, description = "Invalid Google token")
    )
)]
pub async fn google_login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GoogleLoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let response = state.auth_service.login_with_google(&payload.token).await?;
    Ok(Json(response))
}
