//! City directory handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::api::AppState;
use crate::domain::CityResponse;
use crate::errors::AppResult;

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    /// ISO 3166 alpha-2 country filter
    pub country: Option<String>,
}

/// Create city routes
pub fn city_routes() -> Router<AppState> {
    Router::new().route("/", get(list_cities))
}

/// List cities, optionally filtered by country
#[utoipa::path(
    get,
    path = "/api/cities",
    tag = "Cities",
    params(
        ("country" = Option<String>, Query, description = "ISO 3166 alpha-2 country filter")
    ),
    responses(
        (status = 200, description = "City list", body = [CityResponse])
    )
)]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> AppResult<Json<Vec<CityResponse>>> {
    let cities = state.services.cities().list_cities(query.country).await?;
    Ok(Json(cities))
}
