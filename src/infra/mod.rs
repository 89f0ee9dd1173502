//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections and repositories
//! - Caching (Redis)
//! - The payment provider HTTP client lives in the services layer,
//!   behind the PaymentGateway trait

pub mod cache;
pub mod db;
pub mod repositories;

pub use cache::{Cache, LockGuard};
pub use db::{Database, Migrator};
pub use repositories::{
    BookingRepository, BookingStore, CatalogRepository, CatalogStore, CityRepository, CityStore,
    ClientRepository, ClientStore, MasterRepository, MasterStore, NewBooking, NewPayment,
    PaymentRepository, PaymentStore, ScheduleRepository, ScheduleStore,
};
