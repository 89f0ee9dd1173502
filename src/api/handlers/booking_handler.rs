//! Booking handlers: slots, creation, and cancellation.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::config::success_messages;
use crate::domain::slots::Slot;
use crate::domain::BookingResponse;
use crate::errors::AppResult;
use crate::types::{Created, MessageResponse};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    /// Date to look up, YYYY-MM-DD
    pub date: NaiveDate,
}

/// Booking creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[schema(example = 12)]
    pub service_id: i32,
    /// Desired start, ISO 8601
    #[schema(example = "2026-09-01T10:30:00Z")]
    pub start_datetime: DateTime<Utc>,
    #[validate(length(max = 500, message = "Comment is too long"))]
    pub comment: Option<String>,
}

/// Create booking routes (all require authentication)
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/masters/:id/services/:service_id/slots", get(slots))
        .route("/bookings", get(my_bookings))
        .route("/bookings", post(create_booking))
        .route("/bookings/:id", delete(cancel_booking))
}

/// Free start times for a service on a date
#[utoipa::path(
    get,
    path = "/api/masters/{id}/services/{service_id}/slots",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Master ID"),
        ("service_id" = i32, Path, description = "Service ID"),
        ("date" = String, Query, description = "Date to look up, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Available slots", body = [Slot]),
        (status = 404, description = "Master or service not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn slots(
    State(state): State<AppState>,
    Path((master_id, service_id)): Path<(i32, i32)>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = state
        .services
        .bookings()
        .slots(master_id, service_id, query.date)
        .await?;
    Ok(Json(slots))
}

/// Upcoming bookings of the caller
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Upcoming bookings", body = [BookingResponse])
    ),
    security(("bearer_auth" = []))
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state.services.bookings().my_bookings(user.client_id).await?;
    Ok(Json(bookings))
}

/// Book a slot
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Slot taken or validation error"),
        (status = 404, description = "Service not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<Created<BookingResponse>> {
    let booking = state
        .services
        .bookings()
        .create(
            user.client_id,
            payload.service_id,
            payload.start_datetime,
            payload.comment,
        )
        .await?;
    Ok(Created(booking))
}

/// Cancel a booking
#[utoipa::path(
    delete,
    path = "/api/bookings/{id}",
    tag = "Bookings",
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = MessageResponse),
        (status = 400, description = "Cancellation window has passed"),
        (status = 404, description = "Booking not found")
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.bookings().cancel(user.client_id, id).await?;
    Ok(Json(MessageResponse::new(
        success_messages::BOOKING_CANCELLED,
    )))
}
