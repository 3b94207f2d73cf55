//! Wallet handlers. Both routes sit behind the session middleware.

use axum::{
    extract::{Extension, State},
    response::Json,
};

use crate::api::extractors::JsonBody;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{BalanceResponse, DeductionRequest, DeductionResponse};
use crate::errors::AppResult;

/// Current wallet balance
#[utoipa::path(
    get,
    path = "/api/wallet/balance",
    tag = "Wallet",
    responses(
        (status = 200, description = "Balance as a two-decimal string", body = BalanceResponse),
        (status = 401, description = "Missing or unknown session token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn balance(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<Json<BalanceResponse>> {
    let response = state.wallet_service.balance(&user).await?;
    Ok(Json(response))
}

/// Pay with wallet balance
#[utoipa::path(
    post,
    path = "/api/wallet/deduct",
    tag = "Wallet",
    request_body = DeductionRequest,
    responses(
        (status = 200, description = "Balance debited", body = DeductionResponse),
        (status = 400, description = "Invalid amount or body"),
        (status = 401, description = "Missing or unknown session token"),
        (status = 403, description = "Insufficient balance")
    ),
    security(("bearer_auth" = []))
)]
pub async fn deduct(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    JsonBody(request): JsonBody<DeductionRequest>,
) -> AppResult<Json<DeductionResponse>> {
    let response = state.wallet_service.deduct(&user, request).await?;
    Ok(Json(response))
}
