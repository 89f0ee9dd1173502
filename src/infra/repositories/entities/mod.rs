//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod booking;
pub mod city;
pub mod client;
pub mod client_master_link;
pub mod country_currency;
pub mod master_account;
pub mod payment;
pub mod portfolio_photo;
pub mod service;
pub mod service_category;
pub mod work_period;
