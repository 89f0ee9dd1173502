//! Service container - centralized service access.
//!
//! Wires repositories, the cache, and the payment gateway into the
//! application services, and hands them to the API layer behind traits.

use std::sync::Arc;

use super::{
    AdminManager, AdminService, AuthService, Authenticator, BookingManager, BookingService,
    CityDirectory, CityService, MasterCatalog, MasterService, PaymentGateway, PaymentManager,
    PaymentService, YooKassaGateway,
};
use crate::config::Config;
use crate::infra::{
    BookingStore, Cache, CatalogStore, CityStore, ClientStore, MasterStore, PaymentStore,
    ScheduleStore,
};
use crate::jobs::JobQueue;

/// Concrete service container
#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    city_service: Arc<dyn CityService>,
    master_service: Arc<dyn MasterService>,
    booking_service: Arc<dyn BookingService>,
    admin_service: Arc<dyn AdminService>,
    payment_service: Arc<dyn PaymentService>,
}

impl Services {
    /// Wire all services from the shared connections and config.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        cache: Cache,
        config: Config,
        queue: Arc<dyn JobQueue>,
    ) -> Self {
        let cities = Arc::new(CityStore::new(db.clone()));
        let masters = Arc::new(MasterStore::new(db.clone()));
        let catalog = Arc::new(CatalogStore::new(db.clone()));
        let schedule = Arc::new(ScheduleStore::new(db.clone()));
        let clients = Arc::new(ClientStore::new(db.clone()));
        let bookings = Arc::new(BookingStore::new(db.clone()));
        let payments = Arc::new(PaymentStore::new(db));

        let gateway: Arc<dyn PaymentGateway> = Arc::new(YooKassaGateway::new(
            config.payment.clone(),
            config.payment_return_url.clone(),
        ));

        let auth_service = Arc::new(Authenticator::new(clients.clone(), config.clone()));
        let city_service = Arc::new(CityDirectory::new(cities.clone(), cache.clone()));
        let master_service = Arc::new(MasterCatalog::new(
            masters.clone(),
            catalog.clone(),
            schedule.clone(),
            cities,
            clients.clone(),
        ));
        let booking_service = Arc::new(BookingManager::new(
            bookings.clone(),
            catalog,
            masters.clone(),
            schedule,
            clients.clone(),
            queue,
            cache,
        ));
        let admin_service = Arc::new(AdminManager::new(masters.clone(), clients, bookings));
        let payment_service = Arc::new(PaymentManager::new(
            payments,
            masters,
            city_service.clone(),
            gateway,
            config,
        ));

        Self {
            auth_service,
            city_service,
            master_service,
            booking_service,
            admin_service,
            payment_service,
        }
    }

    /// Build a container from already-constructed services (used by tests).
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        city_service: Arc<dyn CityService>,
        master_service: Arc<dyn MasterService>,
        booking_service: Arc<dyn BookingService>,
        admin_service: Arc<dyn AdminService>,
        payment_service: Arc<dyn PaymentService>,
    ) -> Self {
        Self {
            auth_service,
            city_service,
            master_service,
            booking_service,
            admin_service,
            payment_service,
        }
    }

    pub fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    pub fn cities(&self) -> Arc<dyn CityService> {
        self.city_service.clone()
    }

    pub fn masters(&self) -> Arc<dyn MasterService> {
        self.master_service.clone()
    }

    pub fn bookings(&self) -> Arc<dyn BookingService> {
        self.booking_service.clone()
    }

    pub fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }

    pub fn payments(&self) -> Arc<dyn PaymentService> {
        self.payment_service.clone()
    }
}
