//! API-level tests: error mapping, authentication, and response shapes.
//!
//! Uses hand-written stubs instead of real database or Redis connections.

use async_trait::async_trait;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;

use utoipa::OpenApi;

use lumi_api::api::ApiDoc;
use lumi_api::config::Config;
use lumi_api::domain::{Booking, BookingResponse, CityResponse, Client};
use lumi_api::errors::{AppError, AppResult};
use lumi_api::infra::ClientRepository;
use lumi_api::services::{AuthService, Authenticator, Claims, ROLE_ADMIN, ROLE_CLIENT};
use lumi_api::types::{MessageResponse, Paginated};

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn test_error_status_codes() {
    assert_eq!(
        AppError::Unauthorized.into_response().status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        AppError::Forbidden.into_response().status(),
        StatusCode::FORBIDDEN
    );
    assert_eq!(
        AppError::not_found("Master not found").into_response().status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        AppError::conflict("Link").into_response().status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        AppError::PaymentProvider("down".to_string())
            .into_response()
            .status(),
        StatusCode::BAD_GATEWAY
    );
}

#[tokio::test]
async fn test_occupied_slot_maps_to_bad_request() {
    // Occupied slots are a client mistake, not a conflict, in this API
    assert_eq!(
        AppError::SlotTaken.into_response().status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_validation_error_maps_to_bad_request() {
    assert_eq!(
        AppError::validation("bad date").into_response().status(),
        StatusCode::BAD_REQUEST
    );
}

// =============================================================================
// Authentication round trip
// =============================================================================

/// Client store stub that hands out a fixed client id
struct StubClients;

#[async_trait]
impl ClientRepository for StubClients {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Client>> {
        Ok(Some(Client {
            id,
            telegram_id: 123456,
            created_at: Utc::now(),
        }))
    }

    async fn get_or_create(&self, telegram_id: i64) -> AppResult<Client> {
        Ok(Client {
            id: 7,
            telegram_id,
            created_at: Utc::now(),
        })
    }

    async fn linked_master_ids(&self, _client_id: i32) -> AppResult<Vec<i32>> {
        Ok(vec![])
    }

    async fn is_linked(&self, _client_id: i32, _master_id: i32) -> AppResult<bool> {
        Ok(false)
    }

    async fn link_master(&self, _client_id: i32, _master_id: i32) -> AppResult<()> {
        Ok(())
    }

    async fn unlink_master(&self, _client_id: i32, _master_id: i32) -> AppResult<bool> {
        Ok(false)
    }

    async fn count_all(&self) -> AppResult<u64> {
        Ok(0)
    }
}

fn authenticator() -> Authenticator {
    Authenticator::new(std::sync::Arc::new(StubClients), Config::from_env())
}

#[tokio::test]
async fn test_authenticate_issues_verifiable_token() {
    let auth = authenticator();

    let token = auth.authenticate(123456).await.unwrap();
    assert_eq!(token.token_type, "Bearer");
    assert!(token.expires_in > 0);

    let claims = auth.verify_token(&token.access_token).unwrap();
    assert_eq!(claims.sub, 7);
    assert_eq!(claims.telegram_id, 123456);
    assert_eq!(claims.role, ROLE_CLIENT);
    assert!(claims.exp > claims.iat);
}

#[tokio::test]
async fn test_verify_rejects_garbage_token() {
    let auth = authenticator();
    assert!(auth.verify_token("not-a-jwt").is_err());
}

#[tokio::test]
async fn test_claims_admin_check() {
    let mut claims = Claims {
        sub: 1,
        telegram_id: 1,
        role: ROLE_CLIENT.to_string(),
        exp: Utc::now().timestamp() + 3600,
        iat: Utc::now().timestamp(),
    };
    assert!(!claims.is_admin());

    claims.role = ROLE_ADMIN.to_string();
    assert!(claims.is_admin());
}

// =============================================================================
// Response shapes
// =============================================================================

#[tokio::test]
async fn test_booking_response_serializes_rfc3339() {
    let start = Utc::now();
    let booking = Booking {
        id: 1,
        client_id: 7,
        master_account_id: 3,
        service_id: 9,
        start_dt: start,
        end_dt: start + chrono::Duration::minutes(60),
        price: 1500.0,
        comment: None,
        created_at: Utc::now(),
    };

    let response =
        BookingResponse::new(&booking, "Anna".to_string(), "Manicure".to_string(), "RUB");
    assert_eq!(response.master_name, "Anna");
    assert_eq!(response.service_title, "Manicure");
    assert_eq!(response.status, "confirmed");
    assert_eq!(response.price_display, "1500 ₽");
    assert_eq!(response.start_datetime, start.to_rfc3339());
}

#[tokio::test]
async fn test_message_response() {
    let response = MessageResponse::new("Master added");
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["message"], "Master added");
}

#[tokio::test]
async fn test_paginated_meta_in_body() {
    let page: Paginated<i32> = Paginated::new(vec![1, 2, 3], 1, 3, 7);
    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["meta"]["total"], 7);
    assert_eq!(json["meta"]["total_pages"], 3);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_city_response_survives_cache_round_trip() {
    // The city directory is stored in Redis as JSON and read back
    let cities = vec![CityResponse {
        id: 1,
        name_ru: "Москва".to_string(),
        name_local: "Москва".to_string(),
        name_en: "Moscow".to_string(),
    }];
    let json = serde_json::to_string(&cities).unwrap();
    let restored: Vec<CityResponse> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.len(), 1);
    assert_eq!(restored[0].name_en, "Moscow");
}

#[tokio::test]
async fn test_public_city_route_lives_under_api() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    assert!(doc["paths"].get("/api/cities").is_some());
    assert!(doc["paths"].get("/cities").is_none());
}
