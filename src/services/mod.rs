//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.

mod admin_service;
mod auth_service;
mod booking_service;
mod city_service;
pub mod container;
mod master_service;
mod payment_service;

pub use container::Services;

pub use admin_service::{AdminManager, AdminMasterRow, AdminService, PlatformStats};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse, ROLE_ADMIN, ROLE_CLIENT};
pub use booking_service::{BookingManager, BookingService};
pub use city_service::{CityDirectory, CityService};
pub use master_service::{MasterCatalog, MasterService};
pub use payment_service::{
    GatewayPayment, PaymentGateway, PaymentManager, PaymentResponse, PaymentService,
    YooKassaGateway,
};
