//! Master discovery and personal list service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::error_messages;
use crate::domain::{
    MasterAccount, MasterDetailResponse, MasterResponse, ServiceResponse, WorkPeriodResponse,
};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{
    CatalogRepository, CityRepository, ClientRepository, MasterRepository, ScheduleRepository,
};

/// Master discovery service trait for dependency injection.
#[async_trait]
pub trait MasterService: Send + Sync {
    /// Unblocked masters in a city, minus those already on the client's
    /// list, with active service counts
    async fn masters_in_city(&self, city_id: i32, client_id: i32)
        -> AppResult<Vec<MasterResponse>>;

    /// Full master card: profile, services with portfolios, weekly schedule
    async fn master_detail(&self, master_id: i32) -> AppResult<MasterDetailResponse>;

    /// Masters on the client's personal list
    async fn my_masters(&self, client_id: i32) -> AppResult<Vec<MasterResponse>>;

    /// Add a master to the client's list
    async fn add_master(&self, client_id: i32, master_id: i32) -> AppResult<()>;

    /// Remove a master from the client's list
    async fn remove_master(&self, client_id: i32, master_id: i32) -> AppResult<()>;
}

/// Concrete implementation of MasterService
pub struct MasterCatalog {
    masters: Arc<dyn MasterRepository>,
    catalog: Arc<dyn CatalogRepository>,
    schedule: Arc<dyn ScheduleRepository>,
    cities: Arc<dyn CityRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl MasterCatalog {
    pub fn new(
        masters: Arc<dyn MasterRepository>,
        catalog: Arc<dyn CatalogRepository>,
        schedule: Arc<dyn ScheduleRepository>,
        cities: Arc<dyn CityRepository>,
        clients: Arc<dyn ClientRepository>,
    ) -> Self {
        Self {
            masters,
            catalog,
            schedule,
            cities,
            clients,
        }
    }

    async fn to_responses(&self, masters: Vec<MasterAccount>) -> AppResult<Vec<MasterResponse>> {
        let ids: Vec<i32> = masters.iter().map(|m| m.id).collect();
        let counts = self.catalog.service_counts(ids).await?;

        let mut city_names: HashMap<i32, String> = HashMap::new();
        let mut responses = Vec::with_capacity(masters.len());
        for master in masters {
            let city_name = match master.city_id {
                Some(city_id) => match city_names.get(&city_id) {
                    Some(name) => Some(name.clone()),
                    None => {
                        let name = self
                            .cities
                            .find_by_id(city_id)
                            .await?
                            .map(|c| c.name_ru);
                        if let Some(ref n) = name {
                            city_names.insert(city_id, n.clone());
                        }
                        name
                    }
                },
                None => None,
            };

            responses.push(MasterResponse {
                id: master.id,
                name: master.name,
                description: master.description,
                avatar_url: master.avatar_url,
                city_name,
                services_count: counts.get(&master.id).copied().unwrap_or(0),
            });
        }
        Ok(responses)
    }
}

#[async_trait]
impl MasterService for MasterCatalog {
    async fn masters_in_city(
        &self,
        city_id: i32,
        client_id: i32,
    ) -> AppResult<Vec<MasterResponse>> {
        self.cities
            .find_by_id(city_id)
            .await?
            .ok_or_not_found(error_messages::CITY_NOT_FOUND)?;

        // Masters the client already follows live on the personal list,
        // so city browsing skips them
        let linked = self.clients.linked_master_ids(client_id).await?;

        let masters = self
            .masters
            .list_visible_by_city(city_id)
            .await?
            .into_iter()
            .filter(|m| !linked.contains(&m.id))
            .collect();
        self.to_responses(masters).await
    }

    async fn master_detail(&self, master_id: i32) -> AppResult<MasterDetailResponse> {
        let master = self
            .masters
            .find_by_id(master_id)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        if !master.accepts_bookings() {
            return Err(AppError::not_found(error_messages::MASTER_NOT_FOUND));
        }

        let categories: HashMap<i32, String> = self
            .catalog
            .categories_for_master(master_id)
            .await?
            .into_iter()
            .map(|c| (c.id, c.title))
            .collect();

        let mut services = Vec::new();
        for service in self.catalog.services_for_master(master_id).await? {
            let category_name = service
                .category_id
                .and_then(|id| categories.get(&id).cloned());
            let portfolio = self.catalog.portfolio_for_service(service.id).await?;
            services.push(ServiceResponse::new(service, category_name, portfolio));
        }

        let work_schedule: Vec<WorkPeriodResponse> = self
            .schedule
            .periods_for_master(master_id)
            .await?
            .into_iter()
            .map(WorkPeriodResponse::from)
            .collect();

        let city = match master.city_id {
            Some(city_id) => self.cities.find_by_id(city_id).await?.map(|c| c.name_ru),
            None => None,
        };

        Ok(MasterDetailResponse {
            id: master.id,
            name: master.name,
            description: master.description,
            avatar_url: master.avatar_url,
            city,
            services,
            work_schedule,
        })
    }

    async fn my_masters(&self, client_id: i32) -> AppResult<Vec<MasterResponse>> {
        let ids = self.clients.linked_master_ids(client_id).await?;
        let masters = self
            .masters
            .find_by_ids(ids)
            .await?
            .into_iter()
            .filter(MasterAccount::accepts_bookings)
            .collect();
        self.to_responses(masters).await
    }

    async fn add_master(&self, client_id: i32, master_id: i32) -> AppResult<()> {
        let master = self
            .masters
            .find_by_id(master_id)
            .await?
            .ok_or_not_found(error_messages::MASTER_NOT_FOUND)?;

        if !master.accepts_bookings() {
            return Err(AppError::not_found(error_messages::MASTER_NOT_FOUND));
        }

        if self.clients.is_linked(client_id, master_id).await? {
            return Err(AppError::conflict(crate::config::entity_names::LINK));
        }

        self.clients.link_master(client_id, master_id).await
    }

    async fn remove_master(&self, client_id: i32, master_id: i32) -> AppResult<()> {
        let removed = self.clients.unlink_master(client_id, master_id).await?;
        if !removed {
            return Err(AppError::not_found(error_messages::MASTER_NOT_FOUND));
        }
        Ok(())
    }
}
