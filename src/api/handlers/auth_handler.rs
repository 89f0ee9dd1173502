//! Authentication handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::TokenResponse;

/// Token exchange request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TokenRequest {
    /// Telegram id of the caller
    #[validate(range(min = 1, message = "telegram_id must be positive"))]
    #[schema(example = 123456789)]
    pub telegram_id: i64,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/token", post(token))
}

/// Exchange a telegram id for a JWT
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "Authentication",
    request_body = TokenRequest,
    responses(
        (status = 200, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Validation error"),
        (status = 429, description = "Too many requests")
    )
)]
pub async fn token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TokenRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state.services.auth().authenticate(payload.telegram_id).await?;
    Ok(Json(token))
}
