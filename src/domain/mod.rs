//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod booking;
pub mod catalog;
pub mod city;
pub mod client;
pub mod currency;
pub mod master;
pub mod payment;
pub mod schedule;
pub mod slots;

pub use booking::{Booking, BookingResponse};
pub use catalog::{PortfolioPhoto, Service, ServiceCategory, ServiceResponse};
pub use city::{City, CityResponse};
pub use client::Client;
pub use master::{MasterAccount, MasterDetailResponse, MasterResponse, SubscriptionLevel};
pub use payment::{Payment, PaymentStatus};
pub use schedule::{WorkPeriod, WorkPeriodResponse};
