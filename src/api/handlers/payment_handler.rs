//! Checkout handler.

use axum::{extract::State, response::Json};

use crate::api::extractors::PaymentForm;
use crate::api::AppState;
use crate::domain::PaymentResponse;
use crate::errors::AppResult;

/// Submit a payment for manual confirmation
///
/// Accepts multipart (with an optional `paymentReceipt` file), JSON or
/// urlencoded bodies.
#[utoipa::path(
    post,
    path = "/api/payments",
    tag = "Payments",
    responses(
        (status = 200, description = "Payment registered", body = PaymentResponse),
        (status = 400, description = "Missing or invalid fields"),
        (status = 500, description = "Could not store the payment")
    )
)]
pub async fn submit_payment(
    State(state): State<AppState>,
    form: PaymentForm,
) -> AppResult<Json<PaymentResponse>> {
    let response = state
        .payment_service
        .submit(form.fields, form.receipt)
        .await?;
    Ok(Json(response))
}
