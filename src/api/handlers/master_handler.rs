//! Master discovery and personal list handlers.

use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::success_messages;
use crate::domain::{MasterDetailResponse, MasterResponse};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create master routes (all require authentication)
pub fn master_routes() -> Router<AppState> {
    Router::new()
        .route("/cities/:city_id/masters", get(list_masters))
        .route("/masters/:id", get(master_detail))
        .route("/my/masters", get(my_masters))
        .route("/my/masters/:id", post(add_master))
        .route("/my/masters/:id", delete(remove_master))
}

/// List masters in a city, excluding those already on the caller's list
#[utoipa::path(
    get,
    path = "/api/cities/{city_id}/masters",
    tag = "Masters",
    params(
        ("city_id" = i32, Path, description = "City to search in")
    ),
    responses(
        (status = 200, description = "Masters in the city", body = [MasterResponse]),
        (status = 404, description = "City not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_masters(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(city_id): Path<i32>,
) -> AppResult<Json<Vec<MasterResponse>>> {
    let masters = state
        .services
        .masters()
        .masters_in_city(city_id, user.client_id)
        .await?;
    Ok(Json(masters))
}

/// Full master card with services and schedule
#[utoipa::path(
    get,
    path = "/api/masters/{id}",
    tag = "Masters",
    params(
        ("id" = i32, Path, description = "Master ID")
    ),
    responses(
        (status = 200, description = "Master detail", body = MasterDetailResponse),
        (status = 404, description = "Master not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn master_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MasterDetailResponse>> {
    let detail = state.services.masters().master_detail(id).await?;
    Ok(Json(detail))
}

/// Masters on the caller's personal list
#[utoipa::path(
    get,
    path = "/api/my/masters",
    tag = "Masters",
    responses(
        (status = 200, description = "Personal master list", body = [MasterResponse])
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_masters(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<MasterResponse>>> {
    let masters = state.services.masters().my_masters(user.client_id).await?;
    Ok(Json(masters))
}

/// Add a master to the caller's list
#[utoipa::path(
    post,
    path = "/api/my/masters/{id}",
    tag = "Masters",
    params(
        ("id" = i32, Path, description = "Master ID")
    ),
    responses(
        (status = 200, description = "Master added", body = MessageResponse),
        (status = 404, description = "Master not found"),
        (status = 409, description = "Master already on the list")
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_master(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.masters().add_master(user.client_id, id).await?;
    Ok(Json(MessageResponse::new(success_messages::MASTER_ADDED)))
}

/// Remove a master from the caller's list
#[utoipa::path(
    delete,
    path = "/api/my/masters/{id}",
    tag = "Masters",
    params(
        ("id" = i32, Path, description = "Master ID")
    ),
    responses(
        (status = 200, description = "Master removed", body = MessageResponse),
        (status = 404, description = "Master not on the list")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_master(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .masters()
        .remove_master(user.client_id, id)
        .await?;
    Ok(Json(MessageResponse::new(success_messages::MASTER_REMOVED)))
}
