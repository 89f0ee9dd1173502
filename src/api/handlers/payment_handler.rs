//! Premium payment handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::PaymentResponse;
use crate::types::Created;

/// Create payment routes (all require authentication)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/payments/premium", post(create_premium_payment))
        .route("/payments/:id", get(check_payment))
}

/// Start a premium subscription payment for the caller's master account
#[utoipa::path(
    post,
    path = "/api/payments/premium",
    tag = "Payments",
    responses(
        (status = 201, description = "Payment created", body = PaymentResponse),
        (status = 404, description = "No master account for this caller"),
        (status = 502, description = "Payment provider error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_premium_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Created<PaymentResponse>> {
    let payment = state
        .services
        .payments()
        .create_premium_payment(user.telegram_id)
        .await?;
    Ok(Created(payment))
}

/// Poll a payment of the caller's master account; a succeeded payment
/// activates premium
#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    tag = "Payments",
    params(
        ("id" = i32, Path, description = "Payment ID")
    ),
    responses(
        (status = 200, description = "Payment status", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
        (status = 502, description = "Payment provider error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_payment(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<PaymentResponse>> {
    let payment = state
        .services
        .payments()
        .check_payment(id, user.telegram_id)
        .await?;
    Ok(Json(payment))
}
