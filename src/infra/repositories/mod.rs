//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;

mod booking_repository;
mod catalog_repository;
mod city_repository;
mod client_repository;
mod master_repository;
mod payment_repository;
mod schedule_repository;

pub use booking_repository::{BookingRepository, BookingStore, NewBooking};
pub use catalog_repository::{CatalogRepository, CatalogStore};
pub use city_repository::{CityRepository, CityStore};
pub use client_repository::{ClientRepository, ClientStore};
pub use master_repository::{MasterRepository, MasterStore};
pub use payment_repository::{NewPayment, PaymentRepository, PaymentStore};
pub use schedule_repository::{ScheduleRepository, ScheduleStore};

#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use city_repository::MockCityRepository;
#[cfg(test)]
pub use client_repository::MockClientRepository;
#[cfg(test)]
pub use master_repository::MockMasterRepository;
#[cfg(test)]
pub use payment_repository::MockPaymentRepository;
#[cfg(test)]
pub use schedule_repository::MockScheduleRepository;
