//! HTTP request handlers.

pub mod admin_handler;
pub mod auth_handler;
pub mod booking_handler;
pub mod city_handler;
pub mod master_handler;
pub mod payment_handler;

pub use admin_handler::admin_routes;
pub use auth_handler::auth_routes;
pub use booking_handler::booking_routes;
pub use city_handler::city_routes;
pub use master_handler::master_routes;
pub use payment_handler::payment_routes;
