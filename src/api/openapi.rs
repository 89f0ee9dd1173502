//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    admin_handler, auth_handler, booking_handler, city_handler, master_handler, payment_handler,
};
use crate::domain::slots::Slot;
use crate::domain::{
    BookingResponse, CityResponse, MasterDetailResponse, MasterResponse, ServiceResponse,
    SubscriptionLevel, WorkPeriodResponse,
};
use crate::services::{AdminMasterRow, PaymentResponse, PlatformStats, TokenResponse};
use crate::types::MessageResponse;

/// OpenAPI documentation for the Lumi Beauty API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lumi Beauty API",
        version = "0.1.0",
        description = "Booking platform API for beauty masters and their clients"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Authentication endpoints
        auth_handler::token,
        // City endpoints
        city_handler::list_cities,
        // Master endpoints
        master_handler::list_masters,
        master_handler::master_detail,
        master_handler::my_masters,
        master_handler::add_master,
        master_handler::remove_master,
        // Booking endpoints
        booking_handler::slots,
        booking_handler::my_bookings,
        booking_handler::create_booking,
        booking_handler::cancel_booking,
        // Payment endpoints
        payment_handler::create_premium_payment,
        payment_handler::check_payment,
        // Admin endpoints
        admin_handler::list_masters,
        admin_handler::block_master,
        admin_handler::unblock_master,
        admin_handler::stats,
    ),
    components(
        schemas(
            // Domain types
            CityResponse,
            MasterResponse,
            MasterDetailResponse,
            ServiceResponse,
            WorkPeriodResponse,
            BookingResponse,
            Slot,
            SubscriptionLevel,
            // Service types
            TokenResponse,
            PaymentResponse,
            PlatformStats,
            AdminMasterRow,
            // Request types
            auth_handler::TokenRequest,
            booking_handler::CreateBookingRequest,
            admin_handler::BlockRequest,
            // Shared types
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Token exchange"),
        (name = "Cities", description = "City directory"),
        (name = "Masters", description = "Master discovery and personal lists"),
        (name = "Bookings", description = "Slots and appointments"),
        (name = "Payments", description = "Premium subscription payments"),
        (name = "Admin", description = "Moderation and statistics")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
