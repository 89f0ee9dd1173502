//! Administrative handlers.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::{require_admin, CurrentUser};
use crate::api::AppState;
use crate::config::success_messages;
use crate::errors::AppResult;
use crate::services::{AdminMasterRow, PlatformStats};
use crate::types::{MessageResponse, Paginated, PaginationParams};

/// Block request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct BlockRequest {
    #[validate(length(max = 500, message = "Reason is too long"))]
    pub reason: Option<String>,
}

/// Query parameters for the admin master listing
#[derive(Debug, Deserialize)]
pub struct AdminMasterQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    /// Name substring filter
    pub search: Option<String>,
}

/// Create admin routes (require authentication + admin role)
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/masters", get(list_masters))
        .route("/admin/masters/:id/block", post(block_master))
        .route("/admin/masters/:id/unblock", post(unblock_master))
        .route("/admin/stats", get(stats))
}

/// All masters, paginated
#[utoipa::path(
    get,
    path = "/api/admin/masters",
    tag = "Admin",
    params(
        ("page" = Option<u64>, Query, description = "Page number, 1-indexed"),
        ("per_page" = Option<u64>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Name substring filter")
    ),
    responses(
        (status = 200, description = "Master list"),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_masters(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<AdminMasterQuery>,
) -> AppResult<Json<Paginated<AdminMasterRow>>> {
    require_admin(&user)?;
    let defaults = PaginationParams::default();
    let params = PaginationParams {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    };
    let page = state
        .services
        .admin()
        .list_masters(params, query.search)
        .await?;
    Ok(Json(page))
}

/// Block a master
#[utoipa::path(
    post,
    path = "/api/admin/masters/{id}/block",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "Master ID")
    ),
    request_body = BlockRequest,
    responses(
        (status = 200, description = "Master blocked", body = MessageResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Master not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn block_master(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<BlockRequest>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&user)?;
    state.services.admin().block_master(id, payload.reason).await?;
    Ok(Json(MessageResponse::new(success_messages::MASTER_BLOCKED)))
}

/// Unblock a master
#[utoipa::path(
    post,
    path = "/api/admin/masters/{id}/unblock",
    tag = "Admin",
    params(
        ("id" = i32, Path, description = "Master ID")
    ),
    responses(
        (status = 200, description = "Master unblocked", body = MessageResponse),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Master not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unblock_master(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    require_admin(&user)?;
    state.services.admin().unblock_master(id).await?;
    Ok(Json(MessageResponse::new(
        success_messages::MASTER_UNBLOCKED,
    )))
}

/// Platform statistics
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    tag = "Admin",
    responses(
        (status = 200, description = "Platform counters", body = PlatformStats),
        (status = 403, description = "Admin role required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn stats(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PlatformStats>> {
    require_admin(&user)?;
    let stats = state.services.admin().stats().await?;
    Ok(Json(stats))
}
